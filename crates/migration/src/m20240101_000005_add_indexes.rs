//! Lookup indexes on business codes and store category.
//! Codes are not unique: soft-deleted rows keep their code.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_master_store::MasterStore;
use crate::m20240101_000002_create_master_expedition::MasterExpedition;
use crate::m20240101_000003_create_article_collection::ArticleCollection;
use crate::m20240101_000004_create_master_storage::MasterStorage;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_master_store_code")
                    .table(MasterStore::Table)
                    .col(MasterStore::Code)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_master_store_category")
                    .table(MasterStore::Table)
                    .col(MasterStore::StoreCategory)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_master_expedition_code")
                    .table(MasterExpedition::Table)
                    .col(MasterExpedition::Code)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_article_collection_code")
                    .table(ArticleCollection::Table)
                    .col(ArticleCollection::Code)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_master_storage_code")
                    .table(MasterStorage::Table)
                    .col(MasterStorage::Code)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().if_exists().name("idx_master_store_code").table(MasterStore::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().if_exists().name("idx_master_store_category").table(MasterStore::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().if_exists().name("idx_master_expedition_code").table(MasterExpedition::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().if_exists().name("idx_article_collection_code").table(ArticleCollection::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().if_exists().name("idx_master_storage_code").table(MasterStorage::Table).to_owned())
            .await
    }
}
