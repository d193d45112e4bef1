use crate::entities::payment_entity as payments;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::rules::coupon as coupon_rules;
use crate::services::CouponService;
use crate::utils::normalize_coupon_code;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use uuid::Uuid;

/// Records completed course purchases, redeeming a coupon when one is given
#[derive(Clone)]
pub struct CheckoutService {
    pool: DatabaseConnection,
    coupon_service: CouponService,
}

impl CheckoutService {
    pub fn new(pool: DatabaseConnection, coupon_service: CouponService) -> Self {
        Self {
            pool,
            coupon_service,
        }
    }

    /// Persist a payment. With a coupon, the usage increment, the payment row
    /// and the redemption row commit together or not at all.
    pub async fn checkout(&self, request: CheckoutRequest) -> AppResult<PaymentResponse> {
        if request.amount < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Amount cannot be negative".to_string(),
            ));
        }
        if !coupon_rules::is_whole_cents(request.amount) {
            return Err(AppError::ValidationError(
                "Amount cannot have more than 2 decimal places".to_string(),
            ));
        }

        let amount = request.amount;
        let code = request
            .coupon_code
            .as_deref()
            .map(normalize_coupon_code)
            .filter(|c| !c.is_empty());

        let txn = self.pool.begin().await?;

        let redeemed = match code.as_deref() {
            Some(code) => Some(
                self.coupon_service
                    .redeem_in_txn(&txn, code, &request, amount)
                    .await?,
            ),
            None => None,
        };
        let discount = redeemed
            .as_ref()
            .map(|c| c.discount)
            .unwrap_or(Decimal::ZERO);

        let payment = payments::ActiveModel {
            reference: Set(Uuid::new_v4().to_string()),
            user_id: Set(request.user_id),
            course_id: Set(request.course_id),
            amount: Set(amount),
            discount_amount: Set(discount),
            paid_amount: Set(coupon_rules::paid_amount(amount, discount)),
            coupon_code: Set(redeemed.as_ref().map(|c| c.coupon.code.clone())),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if let Some(redeemed) = &redeemed {
            self.coupon_service
                .record_redemption(&txn, redeemed.coupon.id, request.user_id, payment.id)
                .await?;
        }

        txn.commit().await?;

        match &redeemed {
            Some(redeemed) => log::info!(
                "Payment {} recorded for user {} with coupon {} (discount {}, uses {})",
                payment.reference,
                payment.user_id,
                redeemed.coupon.code,
                payment.discount_amount,
                redeemed.coupon.uses_count
            ),
            None => log::info!(
                "Payment {} recorded for user {} without coupon",
                payment.reference,
                payment.user_id
            ),
        }

        Ok(payment.into())
    }
}
