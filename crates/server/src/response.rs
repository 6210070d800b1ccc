//! Envelope wrapped around every API response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::API_VERSION;
use models::validation::FieldError;
use serde::Serialize;
use service::pagination::Page;
use utoipa::ToSchema;

/// Paging numbers attached to list responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageInfo {
    pub count: usize,
    pub page: u64,
    pub size: u64,
    pub total: u64,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct FieldErrorDoc {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FieldErrorDoc {
    fn from(e: FieldError) -> Self {
        Self { field: e.field, message: e.message }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub api_version: &'static str,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldErrorDoc>>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            api_version: API_VERSION,
            status_code: status.as_u16(),
            message: message.into(),
            data: None,
            info: None,
            errors: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self { data: Some(data), ..Self::new(StatusCode::OK, "OK") }
    }

    pub fn created(data: T) -> Self {
        Self { data: Some(data), ..Self::new(StatusCode::CREATED, "Created") }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn page(page: Page<T>) -> Self {
        let info = PageInfo { count: page.items.len(), page: page.page, size: page.size, total: page.total };
        Self { data: Some(page.items), info: Some(info), ..Self::new(StatusCode::OK, "OK") }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
