use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::payment_entity;

/// Course purchase submitted by the payment collaborator once the charge succeeded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub user_id: i64,
    pub course_id: i64,
    /// Category of the course; only needed for category-scoped coupons
    #[serde(default)]
    pub category_id: Option<i64>,
    #[schema(value_type = String, example = "120.00")]
    pub amount: Decimal,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    pub reference: String,
    pub user_id: i64,
    pub course_id: i64,
    #[schema(value_type = String)]
    pub amount: Decimal,
    #[schema(value_type = String)]
    pub discount_amount: Decimal,
    #[schema(value_type = String)]
    pub paid_amount: Decimal,
    pub coupon_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<payment_entity::Model> for PaymentResponse {
    fn from(m: payment_entity::Model) -> Self {
        PaymentResponse {
            id: m.id,
            reference: m.reference,
            user_id: m.user_id,
            course_id: m.course_id,
            amount: m.amount,
            discount_amount: m.discount_amount,
            paid_amount: m.paid_amount,
            coupon_code: m.coupon_code,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
