use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::{ApiResponse, FieldErrorDoc};

/// Error returned by handlers; always rendered as an [`ApiResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::Validation(_)) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: ApiResponse<()> = match self {
            ApiError::Service(ServiceError::Validation(errors)) => {
                let mut body = ApiResponse::new(status, "Validation Error");
                body.errors = Some(errors.0.into_iter().map(FieldErrorDoc::from).collect());
                body
            }
            ApiError::Service(e @ ServiceError::NotFound { .. }) => ApiResponse::new(status, e.to_string()),
            ApiError::Service(ServiceError::Internal(e)) => {
                error!(error = %e, "internal failure");
                ApiResponse::new(status, "Internal Server Error")
            }
            ApiError::Unauthorized(reason) => {
                warn!(%reason, "request rejected");
                ApiResponse::new(status, "Unauthorized")
            }
            ApiError::BadRequest(msg) => ApiResponse::new(status, msg),
        };
        body.into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
