use sea_orm_migration::prelude::*;

/// Coupons (discount codes created by club admins)
#[derive(DeriveIden)]
enum Coupons {
    Table,
    Id,
    Code,
    CouponType,
    Value,
    MinPurchase,
    MaxDiscount,
    AppliesTo,
    EntityId,
    UsesLimit,
    UsesCount,
    PerUserLimit,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Payments persisted by checkout
#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    Reference,
    UserId,
    CourseId,
    Amount,
    DiscountAmount,
    PaidAmount,
    CouponCode,
    CreatedAt,
}

/// One row per successful coupon redemption
#[derive(DeriveIden)]
enum CouponRedemptions {
    Table,
    Id,
    CouponId,
    UserId,
    PaymentId,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Enum-like columns are stored as short strings so the schema also runs on SQLite.
/// Money columns are NUMERIC(12, 2).
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Coupons::Table)
                    .if_not_exists()
                    .col(&mut crate::id_column(manager, Coupons::Id))
                    // code is intentionally not unique
                    .col(ColumnDef::new(Coupons::Code).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Coupons::CouponType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Coupons::Value).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Coupons::MinPurchase)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Coupons::MaxDiscount).decimal_len(12, 2).null())
                    .col(ColumnDef::new(Coupons::AppliesTo).string_len(20).null())
                    .col(ColumnDef::new(Coupons::EntityId).big_integer().null())
                    .col(ColumnDef::new(Coupons::UsesLimit).integer().null())
                    .col(
                        ColumnDef::new(Coupons::UsesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Coupons::PerUserLimit)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Coupons::StartDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Coupons::EndDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Coupons::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Coupons::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Coupons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_coupons_code")
                    .table(Coupons::Table)
                    .col(Coupons::Code)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(&mut crate::id_column(manager, Payments::Id))
                    .col(
                        ColumnDef::new(Payments::Reference)
                            .string_len(36)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Payments::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Amount).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Payments::DiscountAmount)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Payments::PaidAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::CouponCode).string_len(32).null())
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CouponRedemptions::Table)
                    .if_not_exists()
                    .col(&mut crate::id_column(manager, CouponRedemptions::Id))
                    .col(
                        ColumnDef::new(CouponRedemptions::CouponId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CouponRedemptions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CouponRedemptions::PaymentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CouponRedemptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupon_redemptions_coupon_id")
                            .from(CouponRedemptions::Table, CouponRedemptions::CouponId)
                            .to(Coupons::Table, Coupons::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupon_redemptions_payment_id")
                            .from(CouponRedemptions::Table, CouponRedemptions::PaymentId)
                            .to(Payments::Table, Payments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // per-user redemption counts
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_coupon_redemptions_coupon_user")
                    .table(CouponRedemptions::Table)
                    .col(CouponRedemptions::CouponId)
                    .col(CouponRedemptions::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CouponRedemptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Coupons::Table).to_owned())
            .await?;
        Ok(())
    }
}
