use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum CouponType {
    #[sea_orm(string_value = "percentage")]
    Percentage,
    #[sea_orm(string_value = "fixed")]
    Fixed,
}

impl std::fmt::Display for CouponType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CouponType::Percentage => write!(f, "percentage"),
            CouponType::Fixed => write!(f, "fixed"),
        }
    }
}

/// What a scoped coupon is restricted to. `entity_id` holds the course or category id.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum CouponScope {
    #[sea_orm(string_value = "course")]
    Course,
    #[sea_orm(string_value = "category")]
    Category,
}

impl std::fmt::Display for CouponScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CouponScope::Course => write!(f, "course"),
            CouponScope::Category => write!(f, "category"),
        }
    }
}

/// Coupon entity
/// - uses_limit: NULL means unlimited
/// - uses_count: only ever changed by a successful redemption
/// - start_date / end_date: NULL means unbounded on that side
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub coupon_type: CouponType,
    pub value: Decimal,
    pub min_purchase: Decimal,
    /// Caps percentage discounts
    pub max_discount: Option<Decimal>,
    pub applies_to: Option<CouponScope>,
    pub entity_id: Option<i64>,
    pub uses_limit: Option<i32>,
    pub uses_count: i32,
    pub per_user_limit: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Every use has been consumed (never true for unlimited coupons)
    pub fn is_exhausted(&self) -> bool {
        match self.uses_limit {
            None => false,
            Some(limit) => self.uses_count >= limit,
        }
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start_date.is_none_or(|start| now >= start)
    }

    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_some_and(|end| now > end)
    }

    /// Remaining uses, `None` when unlimited
    pub fn remaining_uses(&self) -> Option<i32> {
        self.uses_limit
            .map(|limit| (limit - self.uses_count).max(0))
    }

    /// Scope as a pair, only when both halves are set
    pub fn scope(&self) -> Option<(CouponScope, i64)> {
        match (self.applies_to, self.entity_id) {
            (Some(scope), Some(id)) => Some((scope, id)),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::coupon_redemptions::Entity")]
    CouponRedemptions,
}

impl Related<super::coupon_redemptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CouponRedemptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
