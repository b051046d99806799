//! newsroom/crates/auth-adapters/src/lib.rs
//!
//! # Auth Adapters
//!
//! Implementations of the `TokenVerifier` port. The JWT verifier ships behind
//! the `auth-jwt` feature; without it the only verifier available rejects
//! every credential, which keeps authenticated routes closed rather than
//! silently open.

use async_trait::async_trait;
use domains::{AppError, Principal, Result, TokenVerifier};

#[cfg(feature = "auth-jwt")]
pub mod jwt;

#[cfg(feature = "auth-jwt")]
pub use jwt::{issue_token, Claims, JwtTokenVerifier};

/// Fallback verifier for builds without an auth backend.
pub struct RejectAllVerifier;

#[async_trait]
impl TokenVerifier for RejectAllVerifier {
    async fn verify(&self, _token: &str) -> Result<Principal> {
        Err(AppError::Unauthorized(
            "no credential verifier is configured".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reject_all_rejects_everything() {
        let err = RejectAllVerifier.verify("any-token").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
