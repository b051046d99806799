//! # Core Traits (Ports)
//!
//! Contracts the adapter crates implement and the service layer consumes.
//! With the `testing` feature enabled, mockall mocks (`MockArticleRepo`,
//! ...) are generated for use in external test crates.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Article, ArticleFilter, ContactMessage, Principal};

/// Document-store contract for articles.
///
/// The store guarantees slug uniqueness (an index) and per-document atomic
/// read-modify-write; nothing here spans more than one document.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ArticleRepo: Send + Sync {
    // Single-document operations
    async fn insert(&self, article: &Article) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>>;

    /// Atomically bump the view counter of the document with this slug and
    /// return the updated document. Concurrent bumps may interleave but none
    /// is lost.
    async fn bump_views(&self, slug: &str) -> Result<Option<Article>>;

    /// Overwrite the document with the same id. Returns false when the id
    /// is unknown.
    async fn replace(&self, article: &Article) -> Result<bool>;
    async fn remove(&self, id: Uuid) -> Result<bool>;

    // Listing operations
    async fn page(&self, filter: &ArticleFilter, limit: i64, offset: i64)
        -> Result<Vec<Article>>;
    async fn count(&self, filter: &ArticleFilter) -> Result<u64>;

    /// Published articles ordered by (views desc, created_at desc).
    async fn most_viewed(&self, limit: i64) -> Result<Vec<Article>>;
}

/// Persistence contract for contact-form submissions.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ContactRepo: Send + Sync {
    async fn insert(&self, message: &ContactMessage) -> Result<()>;

    /// All messages, newest first.
    async fn list_recent(&self) -> Result<Vec<ContactMessage>>;
}

/// Credential verification contract (the auth collaborator).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolves a bearer credential into the acting principal.
    async fn verify(&self, token: &str) -> Result<Principal>;
}
