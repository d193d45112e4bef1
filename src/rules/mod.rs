//! Pure business rules shared by the services.

pub mod coupon;
pub mod scoring;

pub use coupon::{CouponRejection, CouponVerdict, PurchaseContext};
pub use scoring::{MatchStateError, Side};
