pub mod checkout;
pub mod common;
pub mod coupon;
pub mod tournament;

pub use checkout::*;
pub use common::*;
pub use coupon::*;
pub use tournament::*;
