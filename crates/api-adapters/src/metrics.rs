//! Request counters in the OpenMetrics text format.

use axum::extract::{MatchedPath, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use domains::{AppError, Result};
use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

use crate::state::AppState;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpLabels {
    pub method: String,
    /// The matched route template (`/api/news/{slug}`), not the raw path,
    /// to keep the cardinality bounded.
    pub route: String,
    pub status: u32,
}

pub struct ApiMetrics {
    registry: Registry,
    requests: Family<HttpLabels, Counter>,
}

impl ApiMetrics {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix("newsroom");
        let requests = Family::<HttpLabels, Counter>::default();
        registry.register(
            "http_requests",
            "HTTP requests processed",
            requests.clone(),
        );
        Self { registry, requests }
    }

    pub fn observe(&self, method: &Method, route: &str, status: StatusCode) {
        self.requests
            .get_or_create(&HttpLabels {
                method: method.to_string(),
                route: route.to_owned(),
                status: u32::from(status.as_u16()),
            })
            .inc();
    }

    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        encode(&mut out, &self.registry)
            .map_err(|err| AppError::Internal(format!("metrics encoding failed: {err}")))?;
        Ok(out)
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts every request once the response is known.
pub async fn track_http(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let response = next.run(req).await;
    state.metrics.observe(&method, &route, response.status());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_requests_show_up_in_the_rendering() {
        let metrics = ApiMetrics::new();
        metrics.observe(&Method::GET, "/api/news", StatusCode::OK);
        metrics.observe(&Method::GET, "/api/news", StatusCode::OK);

        let out = metrics.render().unwrap();
        assert!(out.contains("newsroom_http_requests_total"));
        assert!(out.contains("route=\"/api/news\""));
        assert!(out.contains("2"));
    }
}
