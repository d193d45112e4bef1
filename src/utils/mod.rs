pub mod code_generator;
pub mod coupon_code;

pub use code_generator::generate_coupon_code;
pub use coupon_code::{normalize_coupon_code, validate_coupon_code};
