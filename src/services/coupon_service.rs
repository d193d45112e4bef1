use crate::entities::{CouponType, coupon_entity as coupons, coupon_redemption_entity as redemptions};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::rules::coupon::{self as coupon_rules, PurchaseContext};
use crate::rules::CouponRejection;
use crate::utils::{generate_coupon_code, normalize_coupon_code, validate_coupon_code};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseBackend,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

const MIN_GENERATED_CODE_LENGTH: usize = 4;
const MAX_GENERATED_CODE_LENGTH: usize = 32;

/// Coupon locked and consumed inside a checkout transaction
#[derive(Debug, Clone)]
pub struct RedeemedCoupon {
    /// Row after the usage increment
    pub coupon: coupons::Model,
    pub discount: Decimal,
}

#[derive(Clone)]
pub struct CouponService {
    pool: DatabaseConnection,
    generated_code_length: usize,
}

impl CouponService {
    pub fn new(pool: DatabaseConnection, generated_code_length: usize) -> Self {
        Self {
            pool,
            generated_code_length: generated_code_length
                .clamp(MIN_GENERATED_CODE_LENGTH, MAX_GENERATED_CODE_LENGTH),
        }
    }

    /// Create a coupon (admin). Malformed data is rejected here so the
    /// evaluator never sees it.
    pub async fn create_coupon(&self, request: CreateCouponRequest) -> AppResult<CouponResponse> {
        validate_new_coupon(&request)?;

        let code = match request
            .code
            .as_deref()
            .map(normalize_coupon_code)
            .filter(|c| !c.is_empty())
        {
            Some(code) => {
                validate_coupon_code(&code)?;
                code
            }
            None => self.generate_unused_code().await?,
        };

        let now = Utc::now();
        let coupon = coupons::ActiveModel {
            code: Set(code),
            coupon_type: Set(request.coupon_type),
            value: Set(request.value),
            min_purchase: Set(request.min_purchase.unwrap_or(Decimal::ZERO)),
            max_discount: Set(request.max_discount),
            applies_to: Set(request.applies_to),
            entity_id: Set(request.entity_id),
            uses_limit: Set(request.uses_limit),
            uses_count: Set(0),
            per_user_limit: Set(request.per_user_limit.unwrap_or(1)),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            is_active: Set(request.is_active.unwrap_or(true)),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Coupon created: id={} code={} type={} value={}",
            coupon.id,
            coupon.code,
            coupon.coupon_type,
            coupon.value
        );

        Ok(coupon.into())
    }

    pub async fn get_coupon(&self, coupon_id: i64) -> AppResult<CouponResponse> {
        let coupon = coupons::Entity::find_by_id(coupon_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))?;
        Ok(coupon.into())
    }

    /// Validate a coupon and price the purchase without redeeming anything
    pub async fn quote(&self, request: CouponQuoteRequest) -> AppResult<CouponQuoteResponse> {
        if request.purchase_amount < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Purchase amount cannot be negative".to_string(),
            ));
        }
        if !coupon_rules::is_whole_cents(request.purchase_amount) {
            return Err(AppError::ValidationError(
                "Purchase amount cannot have more than 2 decimal places".to_string(),
            ));
        }

        let code = normalize_coupon_code(&request.code);
        let coupon = find_latest_by_code(&self.pool, &code, false)
            .await?
            .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))?;

        let prior = count_user_redemptions(&self.pool, coupon.id, request.user_id).await?;
        let purchase_amount = request.purchase_amount;
        let ctx = PurchaseContext {
            purchase_amount,
            course_id: request.course_id,
            category_id: request.category_id,
            user_id: request.user_id,
            prior_redemptions_by_user: prior,
        };

        let verdict = coupon_rules::validate(&coupon, &ctx, Utc::now());
        let discount_amount = if verdict.valid {
            coupon_rules::compute_discount(&coupon, purchase_amount)
        } else {
            Decimal::ZERO
        };

        Ok(CouponQuoteResponse {
            code: coupon.code,
            verdict,
            message: verdict.reason.map(|r| r.user_message().to_string()),
            purchase_amount,
            discount_amount,
            paid_amount: coupon_rules::paid_amount(purchase_amount, discount_amount),
        })
    }

    /// Lock, re-validate and consume one use of a coupon inside `txn`.
    ///
    /// The usage counter is bumped with a single conditional UPDATE
    /// (`uses_count < uses_limit`), so two concurrent checkouts can never both
    /// take the last use. The caller must also call [`Self::record_redemption`]
    /// before committing.
    pub async fn redeem_in_txn(
        &self,
        txn: &DatabaseTransaction,
        code: &str,
        request: &CheckoutRequest,
        purchase_amount: Decimal,
    ) -> AppResult<RedeemedCoupon> {
        lock_coupon_rows(txn, code).await?;
        let coupon = find_latest_by_code(txn, code, true)
            .await?
            .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))?;

        let prior = count_user_redemptions(txn, coupon.id, request.user_id).await?;
        let ctx = PurchaseContext {
            purchase_amount,
            course_id: request.course_id,
            category_id: request.category_id,
            user_id: request.user_id,
            prior_redemptions_by_user: prior,
        };
        coupon_rules::validate(&coupon, &ctx, Utc::now()).into_result()?;

        if let Err(err) = self.consume_use(txn, coupon.id).await {
            if !matches!(err, AppError::CouponRejected(_)) {
                return Err(err);
            }
            log::warn!(
                "Coupon {} lost the race for its last use (user {})",
                coupon.code,
                request.user_id
            );
            return Err(err);
        }

        let coupon = coupons::Entity::find_by_id(coupon.id)
            .one(txn)
            .await?
            .ok_or_else(|| AppError::InternalError("Coupon disappeared after update".into()))?;
        let discount = coupon_rules::compute_discount(&coupon, purchase_amount);

        Ok(RedeemedCoupon { coupon, discount })
    }

    /// Guarded `uses_count + 1`. Fails with `EXHAUSTED` when the coupon is
    /// inactive or has no uses left at the moment of the update.
    pub async fn consume_use<C: ConnectionTrait>(&self, conn: &C, coupon_id: i64) -> AppResult<()> {
        let update_result = coupons::Entity::update_many()
            .col_expr(
                coupons::Column::UsesCount,
                Expr::col(coupons::Column::UsesCount).add(1),
            )
            .col_expr(coupons::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(coupons::Column::Id.eq(coupon_id))
            .filter(coupons::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(coupons::Column::UsesLimit.is_null())
                    .add(Expr::col(coupons::Column::UsesCount).lt(Expr::col(coupons::Column::UsesLimit))),
            )
            .exec(conn)
            .await?;

        if update_result.rows_affected != 1 {
            return Err(CouponRejection::Exhausted.into());
        }
        Ok(())
    }

    pub async fn record_redemption(
        &self,
        txn: &DatabaseTransaction,
        coupon_id: i64,
        user_id: i64,
        payment_id: i64,
    ) -> AppResult<()> {
        redemptions::ActiveModel {
            coupon_id: Set(coupon_id),
            user_id: Set(user_id),
            payment_id: Set(payment_id),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        Ok(())
    }

    async fn generate_unused_code(&self) -> AppResult<String> {
        for _ in 0..5 {
            let code = generate_coupon_code(self.generated_code_length);
            if find_latest_by_code(&self.pool, &code, false).await?.is_none() {
                return Ok(code);
            }
        }
        Err(AppError::InternalError(
            "Could not generate an unused coupon code".to_string(),
        ))
    }
}

/// SQLite has no row locks. A write as the first statement of the
/// transaction takes the database write lock, so a competing checkout waits
/// on the busy timeout instead of failing to upgrade a read lock.
async fn lock_coupon_rows<C: ConnectionTrait>(conn: &C, code: &str) -> Result<(), DbErr> {
    if conn.get_database_backend() != DatabaseBackend::Sqlite {
        return Ok(());
    }
    coupons::Entity::update_many()
        .col_expr(
            coupons::Column::UsesCount,
            Expr::col(coupons::Column::UsesCount).into(),
        )
        .filter(coupons::Column::Code.eq(code))
        .exec(conn)
        .await?;
    Ok(())
}

/// Codes are not unique; the most recently created coupon wins
async fn find_latest_by_code<C: ConnectionTrait>(
    conn: &C,
    code: &str,
    lock: bool,
) -> Result<Option<coupons::Model>, DbErr> {
    let mut query = coupons::Entity::find()
        .filter(coupons::Column::Code.eq(code))
        .order_by_desc(coupons::Column::Id);

    // row lock; SQLite is covered by `lock_coupon_rows`
    if lock && conn.get_database_backend() != DatabaseBackend::Sqlite {
        query = query.lock_exclusive();
    }

    query.one(conn).await
}

async fn count_user_redemptions<C: ConnectionTrait>(
    conn: &C,
    coupon_id: i64,
    user_id: i64,
) -> Result<i64, DbErr> {
    let count = redemptions::Entity::find()
        .filter(redemptions::Column::CouponId.eq(coupon_id))
        .filter(redemptions::Column::UserId.eq(user_id))
        .count(conn)
        .await?;
    Ok(count as i64)
}

/// Data-integrity checks for new coupons
pub fn validate_new_coupon(request: &CreateCouponRequest) -> AppResult<()> {
    let invalid = |msg: &str| Err(AppError::ValidationError(msg.to_string()));

    if request.value < Decimal::ZERO {
        return invalid("Coupon value cannot be negative");
    }
    if request.coupon_type == CouponType::Percentage && request.value > Decimal::ONE_HUNDRED {
        return invalid("Percentage coupons cannot exceed 100");
    }
    if request.min_purchase.is_some_and(|v| v < Decimal::ZERO) {
        return invalid("Minimum purchase cannot be negative");
    }
    if request.max_discount.is_some_and(|v| v < Decimal::ZERO) {
        return invalid("Maximum discount cannot be negative");
    }
    if request.uses_limit.is_some_and(|v| v < 0) {
        return invalid("Usage limit cannot be negative");
    }
    if request.per_user_limit.is_some_and(|v| v < 1) {
        return invalid("Per-user limit must be at least 1");
    }
    if let (Some(start), Some(end)) = (request.start_date, request.end_date)
        && end < start
    {
        return invalid("End date must not be before start date");
    }
    if request.applies_to.is_some() != request.entity_id.is_some() {
        return invalid("applies_to and entity_id must be set together");
    }
    Ok(())
}
