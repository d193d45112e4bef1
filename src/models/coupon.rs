use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{CouponScope, CouponType, coupon_entity};
use crate::rules::CouponVerdict;

/// Admin request to create a coupon
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCouponRequest {
    /// Left empty to have a code generated
    #[serde(default)]
    #[schema(example = "SPRING25")]
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    #[schema(value_type = String, example = "20")]
    pub value: Decimal,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub min_purchase: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub max_discount: Option<Decimal>,
    #[serde(default)]
    pub applies_to: Option<CouponScope>,
    #[serde(default)]
    pub entity_id: Option<i64>,
    /// Omitted = unlimited
    #[serde(default)]
    pub uses_limit: Option<i32>,
    /// Defaults to 1
    #[serde(default)]
    pub per_user_limit: Option<i32>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Defaults to true
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CouponResponse {
    pub id: i64,
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    #[schema(value_type = String)]
    pub value: Decimal,
    #[schema(value_type = String)]
    pub min_purchase: Decimal,
    #[schema(value_type = Option<String>)]
    pub max_discount: Option<Decimal>,
    pub applies_to: Option<CouponScope>,
    pub entity_id: Option<i64>,
    pub uses_limit: Option<i32>,
    pub uses_count: i32,
    pub remaining_uses: Option<i32>,
    pub per_user_limit: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<coupon_entity::Model> for CouponResponse {
    fn from(m: coupon_entity::Model) -> Self {
        let remaining_uses = m.remaining_uses();
        CouponResponse {
            id: m.id,
            code: m.code,
            coupon_type: m.coupon_type,
            value: m.value,
            min_purchase: m.min_purchase,
            max_discount: m.max_discount,
            applies_to: m.applies_to,
            entity_id: m.entity_id,
            uses_limit: m.uses_limit,
            uses_count: m.uses_count,
            remaining_uses,
            per_user_limit: m.per_user_limit,
            start_date: m.start_date,
            end_date: m.end_date,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

/// Price a purchase with a coupon without redeeming it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CouponQuoteRequest {
    #[schema(example = "SPRING25")]
    pub code: String,
    #[schema(value_type = String, example = "100.00")]
    pub purchase_amount: Decimal,
    pub course_id: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CouponQuoteResponse {
    pub code: String,
    pub verdict: CouponVerdict,
    /// Human readable reason when the coupon is rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[schema(value_type = String)]
    pub purchase_amount: Decimal,
    #[schema(value_type = String)]
    pub discount_amount: Decimal,
    #[schema(value_type = String)]
    pub paid_amount: Decimal,
}
