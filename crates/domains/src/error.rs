//! # AppError
//!
//! Centralized error taxonomy for the Newsroom backend. Every layer funnels
//! its failures into these variants; the API crate owns the HTTP mapping.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., an article by id or slug)
    #[error("{0} not found: {1}")]
    NotFound(String, String),

    /// Validation failure (missing required field, unknown category, ...)
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or unverifiable credential
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not the owner of the resource
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Infrastructure failure (store down, constraint violation, ...)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for the common "no article with ..." case.
    pub fn article_not_found(key: impl Into<String>) -> Self {
        AppError::NotFound("news article".into(), key.into())
    }
}

/// A specialized Result type for Newsroom logic.
pub type Result<T> = std::result::Result<T, AppError>;
