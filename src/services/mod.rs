pub mod checkout_service;
pub mod coupon_service;
pub mod tournament_service;

pub use checkout_service::*;
pub use coupon_service::*;
pub use tournament_service::*;
