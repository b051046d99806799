//! newsroom/crates/integration-tests/src/lib.rs
//!
//! Shared fixtures for the integration suite. The `web` module only exists
//! when the `web-axum` feature is on; token helpers additionally need
//! `auth-jwt`.

use domains::{ArticleDraft, Principal};
use uuid::Uuid;

pub fn principal(name: &str) -> Principal {
    Principal { id: Uuid::now_v7(), name: name.into() }
}

pub fn draft(title: &str, category: &str) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        description: "What changed and why it matters".into(),
        content: "Body copy".into(),
        image: "https://img.example/cover.png".into(),
        category: category.to_string(),
        tags: Some("one, two".into()),
        reading_time: Some(3),
    }
}

#[cfg(feature = "web-axum")]
pub mod web {
    use std::sync::Arc;

    use api_adapters::{router, AppState, PageDefaults};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use domains::{ArticleRepo, ContactRepo, TokenVerifier};
    use serde_json::Value;
    use services::{ArticleService, ContactService};
    use storage_adapters::{InMemoryArticleRepo, InMemoryContactRepo};
    use tower::ServiceExt;

    /// A router over fresh in-memory stores with the given verifier. The
    /// repo handles are returned too, for seeding directly.
    pub fn app_with_verifier(
        verifier: Arc<dyn TokenVerifier>,
    ) -> (Router, Arc<InMemoryArticleRepo>, Arc<InMemoryContactRepo>) {
        let articles = Arc::new(InMemoryArticleRepo::new());
        let contact = Arc::new(InMemoryContactRepo::new());
        let state = AppState::new(
            ArticleService::new(articles.clone() as Arc<dyn ArticleRepo>),
            ContactService::new(contact.clone() as Arc<dyn ContactRepo>),
            verifier,
            PageDefaults::default(),
        );
        (router(state), articles, contact)
    }

    pub fn json_request(
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[cfg(feature = "auth-jwt")]
    pub mod jwt {
        use super::*;
        use auth_adapters::JwtTokenVerifier;
        use domains::Principal;
        use secrecy::SecretString;

        pub fn secret() -> SecretString {
            SecretString::from("integration-test-secret".to_string())
        }

        /// Router wired to a real JWT verifier plus the seedable stores.
        pub fn app() -> (Router, Arc<InMemoryArticleRepo>, Arc<InMemoryContactRepo>) {
            app_with_verifier(Arc::new(JwtTokenVerifier::new(&secret())))
        }

        pub fn bearer(principal: &Principal) -> String {
            let token =
                auth_adapters::issue_token(&secret(), principal, chrono::Duration::hours(1))
                    .unwrap();
            format!("Bearer {token}")
        }

        /// Creates an article through the API and returns its `data` object.
        pub async fn create_article(app: &Router, auth: &str, title: &str) -> Value {
            let body = serde_json::json!({
                "title": title,
                "description": "What changed and why it matters",
                "content": "Body copy",
                "image": "https://img.example/cover.png",
                "category": "Technology",
                "tags": "one, two",
                "readingTime": 3
            });
            let request = json_request(Method::POST, "/api/news", Some(auth), Some(body));
            let (status, value) = send(app, request).await;
            assert_eq!(status, StatusCode::CREATED, "create failed: {value}");
            value["data"].clone()
        }
    }
}
