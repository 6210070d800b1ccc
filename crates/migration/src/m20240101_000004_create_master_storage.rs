//! Create `master_storage` table.
//! Warehouses; a store's stock location shares the store's `code`.
use sea_orm_migration::{prelude::*, schema::*};

use crate::with_audit_columns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(MasterStorage::Table)
            .if_not_exists()
            .col(pk_auto(MasterStorage::Id))
            .col(string_len(MasterStorage::Code, 64))
            .col(string_len(MasterStorage::Name, 255))
            .col(text_null(MasterStorage::Description))
            .col(string_len_null(MasterStorage::Address, 512))
            .col(string_len_null(MasterStorage::Phone, 64))
            .col(boolean(MasterStorage::IsCentral).default(false));
        with_audit_columns(&mut table);

        manager.create_table(table.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MasterStorage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum MasterStorage { Table, Id, Code, Name, Description, Address, Phone, IsCentral }
