use std::sync::Arc;

use configs::AuthConfig;
use sea_orm::DatabaseConnection;
use service::identity::RequestIdentity;
use service::validation::DefaultValidateService;
use service::{CrudResource, CrudService};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// `None` until a database is attached; services built from an unbound
    /// state fail every persistence call.
    pub db: Option<DatabaseConnection>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: AuthConfig) -> Self {
        Self { db: Some(db), auth }
    }

    pub fn unbound(auth: AuthConfig) -> Self {
        Self { db: None, auth }
    }

    /// Service for resource `R` acting on behalf of `identity`.
    pub fn service<R: CrudResource>(&self, identity: RequestIdentity) -> CrudService<R> {
        let svc = CrudService::<R>::new(Arc::new(identity), Arc::new(DefaultValidateService));
        match &self.db {
            Some(db) => svc.with_db(db.clone()),
            None => svc,
        }
    }
}
