//! Create `master_store` table.
//! Physical and online outlets, identified by a business `code`.
use sea_orm_migration::{prelude::*, schema::*};

use crate::with_audit_columns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(MasterStore::Table)
            .if_not_exists()
            .col(pk_auto(MasterStore::Id))
            .col(string_len(MasterStore::Name, 255))
            .col(string_len(MasterStore::Code, 64))
            .col(text_null(MasterStore::Description))
            .col(string_len_null(MasterStore::Address, 512))
            .col(string_len_null(MasterStore::City, 128))
            .col(string_len_null(MasterStore::Phone, 64))
            .col(string_len_null(MasterStore::Fax, 64))
            .col(string_len_null(MasterStore::Email, 255))
            .col(string_len_null(MasterStore::Pic, 255))
            .col(string_len_null(MasterStore::StoreCategory, 128))
            .col(string_len_null(MasterStore::StoreWide, 64))
            .col(string_len_null(MasterStore::Channel, 64))
            .col(string_len_null(MasterStore::Status, 64))
            .col(string_len_null(MasterStore::OnlineOffline, 32))
            .col(double(MasterStore::SalesTarget).default(0.0))
            .col(double_null(MasterStore::Longitude))
            .col(double_null(MasterStore::Latitude))
            .col(timestamp_with_time_zone_null(MasterStore::OpeningDate))
            .col(timestamp_with_time_zone_null(MasterStore::ClosingDate));
        with_audit_columns(&mut table);

        manager.create_table(table.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MasterStore::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum MasterStore {
    Table,
    Id,
    Name,
    Code,
    Description,
    Address,
    City,
    Phone,
    Fax,
    Email,
    Pic,
    StoreCategory,
    StoreWide,
    Channel,
    Status,
    OnlineOffline,
    SalesTarget,
    Longitude,
    Latitude,
    OpeningDate,
    ClosingDate,
}
