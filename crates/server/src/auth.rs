//! Caller identity extracted from request headers.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use service::identity::RequestIdentity;

use crate::errors::ApiError;
use crate::state::AppState;

pub const TIMEZONE_OFFSET_HEADER: &str = "x-timezone-offset";

/// Claims read from the bearer token. `username` wins over `sub`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

/// Identity of the caller, available to any handler that asks for it.
#[derive(Clone, Debug)]
pub struct CallerIdentity(pub RequestIdentity);

pub fn decode_username(token: &str, secret: &str) -> Result<String, ApiError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    let data = decode::<Claims>(token, &key, &validation)
        .map_err(|e| ApiError::Unauthorized(format!("token validation failed: {e}")))?;
    data.claims
        .username
        .or(data.claims.sub)
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::Unauthorized("token carries no username".into()))
}

#[async_trait]
impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".into()))?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("expected a Bearer token".into()))?;
        let username = decode_username(token, &state.auth.jwt_secret)?;

        let timezone_offset = match parts.headers.get(TIMEZONE_OFFSET_HEADER) {
            None => 0,
            Some(v) => v
                .to_str()
                .ok()
                .and_then(|s| s.trim().parse::<i32>().ok())
                .ok_or_else(|| ApiError::BadRequest(format!("{TIMEZONE_OFFSET_HEADER} must be an integer")))?,
        };

        Ok(CallerIdentity(RequestIdentity { username, timezone_offset, token: token.to_string() }))
    }
}
