//! Create `master_expedition` table.
use sea_orm_migration::{prelude::*, schema::*};

use crate::with_audit_columns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut table = Table::create();
        table
            .table(MasterExpedition::Table)
            .if_not_exists()
            .col(pk_auto(MasterExpedition::Id))
            .col(string_len(MasterExpedition::Code, 64))
            .col(string_len(MasterExpedition::Name, 255));
        with_audit_columns(&mut table);

        manager.create_table(table.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MasterExpedition::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum MasterExpedition { Table, Id, Code, Name }
