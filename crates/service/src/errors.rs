use std::fmt;

use models::validation::FieldError;
use sea_orm::DbErr;
use thiserror::Error;

/// Every failing field of one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields().join(", "))
    }
}

/// Failures outside the caller's control. Never shown verbatim to clients.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("{0} is not bound to the service")]
    Unbound(&'static str),
    #[error("database error: {0}")]
    Db(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(ValidationErrors),
    #[error("{resource} {key} not found")]
    NotFound { resource: &'static str, key: String },
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, key: impl fmt::Display) -> Self {
        Self::NotFound { resource, key: key.to_string() }
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(field, message))
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        Self::Internal(InternalError::Db(e.to_string()))
    }
}
