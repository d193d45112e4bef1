//! Coupon evaluation
//!
//! Pure checks and discount arithmetic for coupons. Nothing here touches the
//! database; callers load the coupon, count the user's prior redemptions and
//! pass in the current time, so the verdict for a given input never changes.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{CouponScope, CouponType, coupon_entity as coupons};

/// Purchase being priced against a coupon
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseContext {
    pub purchase_amount: Decimal,
    pub course_id: i64,
    /// Category of the purchased course, needed for category-scoped coupons
    pub category_id: Option<i64>,
    pub user_id: i64,
    pub prior_redemptions_by_user: i64,
}

/// Why a coupon cannot be used. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponRejection {
    Inactive,
    NotStarted,
    Expired,
    Exhausted,
    PerUserLimitReached,
    BelowMinPurchase,
    ScopeMismatch,
}

impl CouponRejection {
    pub fn code(&self) -> &'static str {
        match self {
            CouponRejection::Inactive => "INACTIVE",
            CouponRejection::NotStarted => "NOT_STARTED",
            CouponRejection::Expired => "EXPIRED",
            CouponRejection::Exhausted => "EXHAUSTED",
            CouponRejection::PerUserLimitReached => "PER_USER_LIMIT_REACHED",
            CouponRejection::BelowMinPurchase => "BELOW_MIN_PURCHASE",
            CouponRejection::ScopeMismatch => "SCOPE_MISMATCH",
        }
    }

    /// Message shown to the member at checkout
    pub fn user_message(&self) -> &'static str {
        match self {
            CouponRejection::Inactive => "This coupon is no longer active.",
            CouponRejection::NotStarted => "This coupon is not valid yet.",
            CouponRejection::Expired => "This coupon has expired.",
            CouponRejection::Exhausted => "This coupon has been fully redeemed.",
            CouponRejection::PerUserLimitReached => {
                "You have already used this coupon the maximum number of times."
            }
            CouponRejection::BelowMinPurchase => {
                "The purchase amount is below the minimum required for this coupon."
            }
            CouponRejection::ScopeMismatch => "This coupon does not apply to this course.",
        }
    }
}

impl std::fmt::Display for CouponRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CouponVerdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CouponRejection>,
}

impl CouponVerdict {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn rejected(reason: CouponRejection) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    pub fn into_result(self) -> Result<(), CouponRejection> {
        match self.reason {
            None => Ok(()),
            Some(reason) => Err(reason),
        }
    }
}

/// Validate a coupon for a purchase at `now`. The first failing check wins.
pub fn validate(
    coupon: &coupons::Model,
    ctx: &PurchaseContext,
    now: DateTime<Utc>,
) -> CouponVerdict {
    match first_rejection(coupon, ctx, now) {
        Some(reason) => CouponVerdict::rejected(reason),
        None => CouponVerdict::accepted(),
    }
}

fn first_rejection(
    coupon: &coupons::Model,
    ctx: &PurchaseContext,
    now: DateTime<Utc>,
) -> Option<CouponRejection> {
    if !coupon.is_active {
        return Some(CouponRejection::Inactive);
    }
    if !coupon.has_started(now) {
        return Some(CouponRejection::NotStarted);
    }
    if coupon.has_expired(now) {
        return Some(CouponRejection::Expired);
    }
    if coupon.is_exhausted() {
        return Some(CouponRejection::Exhausted);
    }
    if ctx.prior_redemptions_by_user >= i64::from(coupon.per_user_limit) {
        return Some(CouponRejection::PerUserLimitReached);
    }
    if ctx.purchase_amount < coupon.min_purchase {
        return Some(CouponRejection::BelowMinPurchase);
    }
    if !scope_matches(coupon, ctx) {
        return Some(CouponRejection::ScopeMismatch);
    }
    None
}

fn scope_matches(coupon: &coupons::Model, ctx: &PurchaseContext) -> bool {
    match coupon.scope() {
        None => true,
        Some((CouponScope::Course, entity_id)) => ctx.course_id == entity_id,
        Some((CouponScope::Category, entity_id)) => ctx.category_id == Some(entity_id),
    }
}

/// Discount for `purchase_amount`, rounded to cents and kept within
/// `[0, purchase_amount]`.
pub fn compute_discount(coupon: &coupons::Model, purchase_amount: Decimal) -> Decimal {
    if purchase_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let raw = match coupon.coupon_type {
        CouponType::Percentage => {
            let discount = purchase_amount * coupon.value / Decimal::ONE_HUNDRED;
            match coupon.max_discount {
                Some(cap) => discount.min(cap),
                None => discount,
            }
        }
        CouponType::Fixed => coupon.value.min(purchase_amount),
    };

    round_money(raw).max(Decimal::ZERO).min(purchase_amount)
}

/// Amount left to pay after the discount, never negative
pub fn paid_amount(purchase_amount: Decimal, discount: Decimal) -> Decimal {
    (purchase_amount - discount).max(Decimal::ZERO)
}

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// No fraction of a cent
pub fn is_whole_cents(amount: Decimal) -> bool {
    round_money(amount) == amount
}
