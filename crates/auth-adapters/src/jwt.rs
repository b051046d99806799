//! HS256 JWT verification for author credentials.
//!
//! Tokens carry the author's id and display name; the name is denormalized
//! into every article at creation time, so the token is the single source of
//! authorship identity.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use domains::{AppError, Principal, Result, TokenVerifier};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Author id.
    pub sub: Uuid,
    /// Author display name.
    pub name: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: usize,
}

pub struct JwtTokenVerifier {
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(secret: &SecretString) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            // HS256 with mandatory exp.
            validation: Validation::default(),
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            tracing::debug!(%err, "token rejected");
            AppError::Unauthorized("invalid or expired token".into())
        })?;
        Ok(Principal {
            id: data.claims.sub,
            name: data.claims.name,
        })
    }
}

/// Signs a token for `principal`, valid for `ttl`. Used by the seeding tool
/// and by tests; a real deployment issues tokens from its identity service.
pub fn issue_token(secret: &SecretString, principal: &Principal, ttl: Duration) -> Result<String> {
    let claims = Claims {
        sub: principal.id,
        name: principal.name.clone(),
        exp: (Utc::now() + ttl).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|err| AppError::Internal(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("unit-test-secret".to_string())
    }

    fn principal() -> Principal {
        Principal { id: Uuid::now_v7(), name: "Sam Writer".into() }
    }

    #[tokio::test]
    async fn issued_tokens_verify_back_to_the_principal() {
        let secret = secret();
        let who = principal();
        let token = issue_token(&secret, &who, Duration::hours(2)).unwrap();

        let verified = JwtTokenVerifier::new(&secret).verify(&token).await.unwrap();
        assert_eq!(verified, who);
    }

    #[tokio::test]
    async fn tampered_tokens_are_rejected() {
        let secret = secret();
        let token = issue_token(&secret, &principal(), Duration::hours(2)).unwrap();
        let mut tampered = token.into_bytes();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();

        let err = JwtTokenVerifier::new(&secret).verify(&tampered).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected() {
        let secret = secret();
        // Past the default 60s leeway.
        let token = issue_token(&secret, &principal(), Duration::hours(-2)).unwrap();

        let err = JwtTokenVerifier::new(&secret).verify(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn tokens_signed_with_another_secret_are_rejected() {
        let token = issue_token(&secret(), &principal(), Duration::hours(2)).unwrap();
        let other = SecretString::from("a-different-secret".to_string());

        assert!(JwtTokenVerifier::new(&other).verify(&token).await.is_err());
    }
}
