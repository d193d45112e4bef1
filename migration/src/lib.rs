pub use sea_orm_migration::prelude::*;

mod m20250901_000001_add_coupons;
mod m20250901_000002_add_tournament_tables;

pub struct Migrator;

/// Auto-increment primary key. SQLite only accepts AUTOINCREMENT on an
/// INTEGER column, which still holds 64-bit values.
pub(crate) fn id_column<T: IntoIden>(manager: &SchemaManager, name: T) -> ColumnDef {
    let mut col = ColumnDef::new(name);
    match manager.get_database_backend() {
        sea_orm_migration::sea_orm::DatabaseBackend::Sqlite => col.integer(),
        _ => col.big_integer(),
    };
    col.not_null().auto_increment().primary_key();
    col
}

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_add_coupons::Migration),
            Box::new(m20250901_000002_add_tournament_tables::Migration),
        ]
    }
}
