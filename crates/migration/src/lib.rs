//! Migrator registering master-data tables in creation order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

mod m20240101_000001_create_master_store;
mod m20240101_000002_create_master_expedition;
mod m20240101_000003_create_article_collection;
mod m20240101_000004_create_master_storage;
mod m20240101_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_master_store::Migration),
            Box::new(m20240101_000002_create_master_expedition::Migration),
            Box::new(m20240101_000003_create_article_collection::Migration),
            Box::new(m20240101_000004_create_master_storage::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000005_add_indexes::Migration),
        ]
    }
}

/// Audit and soft-delete columns shared by every master-data table.
#[derive(DeriveIden)]
pub(crate) enum Audit {
    CreatedBy,
    CreatedUtc,
    CreatedAgent,
    LastModifiedBy,
    LastModifiedUtc,
    LastModifiedAgent,
    TimezoneOffset,
    IsDeleted,
    DeletedBy,
    DeletedUtc,
    DeletedAgent,
}

pub(crate) fn with_audit_columns(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(string_len(Audit::CreatedBy, 255))
        .col(timestamp_with_time_zone(Audit::CreatedUtc))
        .col(string_len(Audit::CreatedAgent, 255))
        .col(string_len(Audit::LastModifiedBy, 255))
        .col(timestamp_with_time_zone(Audit::LastModifiedUtc))
        .col(string_len(Audit::LastModifiedAgent, 255))
        .col(integer(Audit::TimezoneOffset).default(0))
        .col(boolean(Audit::IsDeleted).default(false))
        .col(string_len_null(Audit::DeletedBy, 255))
        .col(timestamp_with_time_zone_null(Audit::DeletedUtc))
        .col(string_len_null(Audit::DeletedAgent, 255))
}
