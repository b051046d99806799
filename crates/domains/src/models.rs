//! # Domain Models
//!
//! Core entities of the Newsroom backend. Articles use UUID v7 for
//! time-ordered, globally unique identification; slugs are the public
//! lookup key and are derived server-side, never supplied by clients.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// The fixed set of sections an article can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Sports,
    Business,
    Entertainment,
    Health,
    Politics,
    Science,
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Sports,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Politics,
        Category::Science,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Sports => "Sports",
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Politics => "Politics",
            Category::Science => "Science",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    /// Exact-match parse; unknown values are rejected, matching the fixed
    /// enum on the storage schema.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("unknown category `{s}`")))
    }
}

/// A published or draft news item owned by one author. Serializes with the
/// camelCase keys the HTTP surface exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    /// URL-safe lookup key, unique across all articles. Immutable after
    /// creation; later title edits do not touch it.
    pub slug: String,
    pub description: String,
    pub content: String,
    /// Opaque reference to the cover image; hosting lives elsewhere.
    pub image: String,
    pub category: Category,
    /// Owning principal. Immutable after creation.
    pub author_id: Uuid,
    /// Display-name snapshot taken when the article was created.
    pub author_name: String,
    /// Fetch counter; bumped once per successful slug lookup.
    pub views: i64,
    pub is_published: bool,
    pub is_featured: bool,
    pub tags: Vec<String>,
    /// Estimated reading time in minutes.
    pub reading_time: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub const MAX_TITLE_LEN: usize = 200;
    pub const DEFAULT_READING_TIME: u32 = 5;
}

/// An authenticated actor, as resolved by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
}

/// Input for creating an article. Field values arrive as the transport
/// delivered them; `tags` is the comma-separated form used by the editor UI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub image: String,
    pub category: String,
    pub tags: Option<String>,
    pub reading_time: Option<u32>,
}

/// Partial update for an article. `None` means "leave the field alone";
/// a present value is applied after validation. Slug and author fields are
/// deliberately absent: neither ever changes after creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub reading_time: Option<u32>,
}

impl ArticleUpdate {
    /// True when no field at all was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.content.is_none()
            && self.image.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.reading_time.is_none()
    }
}

/// Selection criteria for listing queries. All fields are conjunctive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub published_only: bool,
    pub category: Option<Category>,
    pub author: Option<Uuid>,
}

impl ArticleFilter {
    /// Public listings: published articles, optionally one category.
    pub fn published(category: Option<Category>) -> Self {
        ArticleFilter { published_only: true, category, ..Default::default() }
    }

    /// Author dashboard: everything the author owns, drafts included.
    pub fn by_author(author: Uuid) -> Self {
        ArticleFilter { author: Some(author), ..Default::default() }
    }
}

/// One page of a listing plus the totals the caller needs for paging UI.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matching documents across all pages.
    pub total: u64,
    /// The 1-based page this slice came from.
    pub page: i64,
    /// ceil(total / per_page); 0 when nothing matches.
    pub pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: i64, per_page: i64) -> Self {
        let pages = total.div_ceil(per_page.max(1) as u64);
        Page { items, total, page, pages }
    }
}

/// A message submitted through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Incoming contact-form submission, before stamping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
