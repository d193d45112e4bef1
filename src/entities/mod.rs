pub mod coupon_redemptions;
pub mod coupons;
pub mod payments;
pub mod tournament_matches;
pub mod tournament_rounds;

pub use coupon_redemptions as coupon_redemption_entity;
pub use coupons as coupon_entity;
pub use payments as payment_entity;
pub use tournament_matches as tournament_match_entity;
pub use tournament_rounds as tournament_round_entity;

pub use coupons::{CouponScope, CouponType};
pub use tournament_matches::{MatchResult, MatchStatus};
pub use tournament_rounds::RoundStatus;
