pub mod checkout;
pub mod coupon;
pub mod tournament;

pub use checkout::checkout_config;
pub use coupon::coupon_config;
pub use tournament::tournament_config;

/// All `/api/v1` route groups
pub fn api_config(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(coupon_config)
        .configure(checkout_config)
        .configure(tournament_config);
}
