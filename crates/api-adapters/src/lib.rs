//! newsroom/crates/api-adapters/src/lib.rs
//!
//! # API Adapters
//!
//! The HTTP surface, built on axum behind the `web-axum` feature. Routes are
//! mounted under `/api`; `/healthz` and `/metrics` sit at the root for
//! operators.

#[cfg(feature = "web-axum")]
pub mod envelope;
#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod metrics;
#[cfg(feature = "web-axum")]
pub mod routes;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use routes::router;
#[cfg(feature = "web-axum")]
pub use state::{AppState, PageDefaults};
