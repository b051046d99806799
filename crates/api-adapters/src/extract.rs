//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use domains::{AppError, Principal};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header by the configured verifier. Handlers that take this extractor are
/// closed to anonymous requests.
pub struct AuthPrincipal(pub Principal);

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError(AppError::Unauthorized("missing authorization header".into()))
            })?;
        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(AppError::Unauthorized(
                "authorization scheme must be Bearer".into(),
            ))
        })?;
        let principal = state.verifier.verify(token).await.map_err(ApiError)?;
        Ok(AuthPrincipal(principal))
    }
}
