#![allow(dead_code)]

use chess_club_backend::entities::coupon_entity as coupons;
use chess_club_backend::entities::{CouponScope, CouponType};
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::path::PathBuf;

/// Fresh in-memory database with the schema applied.
///
/// A single pooled connection keeps the in-memory database alive and
/// serializes concurrent transactions the way a row lock would.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// File-backed database with several pooled connections, so transactions
/// really overlap. Files are removed on drop.
pub struct FileDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl FileDb {
    pub async fn open(max_connections: u32) -> Self {
        let path = std::env::temp_dir().join(format!("chess-club-{}.db", uuid::Uuid::new_v4()));
        let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
        options
            .max_connections(max_connections)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .expect("connect to file sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        Self { db, path }
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

/// Builder for coupons inserted straight into the table, bypassing admin
/// validation so tests can set up any state.
pub struct CouponSeed {
    pub code: String,
    pub coupon_type: CouponType,
    pub value: Decimal,
    pub min_purchase: Decimal,
    pub max_discount: Option<Decimal>,
    pub scope: Option<(CouponScope, i64)>,
    pub uses_limit: Option<i32>,
    pub uses_count: i32,
    pub per_user_limit: i32,
    pub start_date: Option<chrono::DateTime<Utc>>,
    pub end_date: Option<chrono::DateTime<Utc>>,
    pub is_active: bool,
}

impl CouponSeed {
    pub fn new(code: &str, coupon_type: CouponType, value: &str) -> Self {
        Self {
            code: code.to_string(),
            coupon_type,
            value: dec(value),
            min_purchase: Decimal::ZERO,
            max_discount: None,
            scope: None,
            uses_limit: None,
            uses_count: 0,
            per_user_limit: 1,
            start_date: None,
            end_date: None,
            is_active: true,
        }
    }

    pub async fn insert(self, db: &DatabaseConnection) -> coupons::Model {
        let now = Utc::now();
        coupons::ActiveModel {
            code: Set(self.code),
            coupon_type: Set(self.coupon_type),
            value: Set(self.value),
            min_purchase: Set(self.min_purchase),
            max_discount: Set(self.max_discount),
            applies_to: Set(self.scope.map(|(s, _)| s)),
            entity_id: Set(self.scope.map(|(_, id)| id)),
            uses_limit: Set(self.uses_limit),
            uses_count: Set(self.uses_count),
            per_user_limit: Set(self.per_user_limit),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            is_active: Set(self.is_active),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("insert coupon")
    }
}
