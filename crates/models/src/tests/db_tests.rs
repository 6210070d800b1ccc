use anyhow::Result;
use configs::DatabaseConfig;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::db::{connect_in_memory, connect_with_config, migrate};
use crate::errors::ModelError;

fn sqlite_config() -> DatabaseConfig {
    DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() }
}

#[tokio::test]
async fn sqlite_config_connects_and_migrates() -> Result<()> {
    let db = connect_with_config(&sqlite_config()).await?;
    migrate(&db).await?;

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT COUNT(*) AS n FROM master_store".to_string());
    let row = db.query_one(stmt).await?.expect("count row");
    let n: i64 = row.try_get("", "n")?;
    assert_eq!(n, 0);
    Ok(())
}

#[tokio::test]
async fn unsupported_url_is_a_config_error() {
    let cfg = DatabaseConfig { url: "mysql://localhost/master".into(), ..Default::default() };
    let err = connect_with_config(&cfg).await.unwrap_err();
    assert!(matches!(err, ModelError::Config(_)));
}

#[tokio::test]
async fn migrations_are_idempotent() -> Result<()> {
    let db = connect_in_memory().await?;
    migrate(&db).await?;
    for table in ["master_store", "master_expedition", "article_collection", "master_storage"] {
        let stmt = Statement::from_string(DatabaseBackend::Sqlite, format!("SELECT COUNT(*) AS n FROM {table}"));
        assert!(db.query_one(stmt).await?.is_some(), "missing {table}");
    }
    Ok(())
}
