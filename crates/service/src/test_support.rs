#![cfg(test)]
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::crud::{CrudResource, CrudService};
use crate::identity::RequestIdentity;
use crate::validation::{DefaultValidateService, ValidateService};

/// Fresh migrated in-memory database; every test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    Ok(db)
}

pub fn identity(username: &str, timezone_offset: i32) -> RequestIdentity {
    RequestIdentity { username: username.into(), timezone_offset, token: format!("{username}-token") }
}

/// Service with the default validation rules, bound to `db`.
pub fn service_for<R: CrudResource>(db: &DatabaseConnection, username: &str) -> CrudService<R> {
    let validator: Arc<dyn ValidateService<R::Model>> = Arc::new(DefaultValidateService);
    CrudService::new(Arc::new(identity(username, 7)), validator).with_db(db.clone())
}
