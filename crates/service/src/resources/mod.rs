//! Master-data resources plugged into [`crate::crud::CrudService`].

pub mod article_collection;
pub mod expedition;
pub mod storage;
pub mod store;

use chrono::{DateTime, Utc};
use models::audit::AuditSnapshot;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Audit block emitted with every view model. Ignored on input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditView {
    #[serde(rename = "_createdBy", default)]
    pub created_by: Option<String>,
    #[serde(rename = "_createdUtc", default)]
    pub created_utc: Option<DateTime<Utc>>,
    #[serde(rename = "_lastModifiedBy", default)]
    pub last_modified_by: Option<String>,
    #[serde(rename = "_lastModifiedUtc", default)]
    pub last_modified_utc: Option<DateTime<Utc>>,
    #[serde(rename = "_timezoneOffset", default)]
    pub timezone_offset: Option<i32>,
}

impl From<AuditSnapshot> for AuditView {
    fn from(a: AuditSnapshot) -> Self {
        Self {
            created_by: Some(a.created_by),
            created_utc: Some(a.created_utc),
            last_modified_by: Some(a.last_modified_by),
            last_modified_utc: Some(a.last_modified_utc),
            timezone_offset: Some(a.timezone_offset),
        }
    }
}

/// Reject a blank lookup parameter as a validation failure on `field`.
pub(crate) fn required_param<'a>(field: &str, value: &'a str) -> Result<&'a str, crate::errors::ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::errors::ServiceError::invalid(field, format!("{field} is required")));
    }
    Ok(trimmed)
}
