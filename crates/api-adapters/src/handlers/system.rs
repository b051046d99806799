//! Operator endpoints outside the `/api` prefix.

use axum::extract::State;
use axum::http::{header, Uri};
use axum::response::IntoResponse;
use axum::Json;
use domains::AppError;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Liveness probe (`GET /healthz`). Answers as soon as the process serves
/// traffic.
pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// OpenMetrics text exposition (`GET /metrics`).
pub async fn metrics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let body = state.metrics.render()?;
    Ok((
        [(
            header::CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        body,
    ))
}

/// Fallback for unmatched paths, keeping the `{"message"}` error shape.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError(AppError::NotFound("route".into(), uri.path().to_owned()))
}
