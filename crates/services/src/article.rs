//! # ArticleService
//!
//! Business rules for the news catalogue: listing and pagination, slug
//! derivation, per-fetch view counting, and owner-only mutation. The service
//! is storage-agnostic; everything persistent goes through [`ArticleRepo`].

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use domains::{
    AppError, Article, ArticleDraft, ArticleFilter, ArticleRepo, ArticleUpdate, Category, Page,
    Principal, Result,
};
use uuid::Uuid;

use crate::slug;

/// How many articles the "most popular" surface shows.
pub const FEATURED_LIMIT: i64 = 6;

#[derive(Clone)]
pub struct ArticleService {
    repo: Arc<dyn ArticleRepo>,
}

impl ArticleService {
    pub fn new(repo: Arc<dyn ArticleRepo>) -> Self {
        Self { repo }
    }

    /// Published articles, newest first, optionally narrowed to a category.
    /// Pages are 1-based; a page past the end yields an empty slice rather
    /// than an error.
    pub async fn list_published(
        &self,
        category: Option<Category>,
        page: i64,
        per_page: i64,
    ) -> Result<Page<Article>> {
        self.list(ArticleFilter::published(category), page, per_page).await
    }

    /// Everything the caller owns, drafts included, newest first.
    pub async fn list_by_author(
        &self,
        author: &Principal,
        page: i64,
        per_page: i64,
    ) -> Result<Page<Article>> {
        self.list(ArticleFilter::by_author(author.id), page, per_page).await
    }

    async fn list(&self, filter: ArticleFilter, page: i64, per_page: i64) -> Result<Page<Article>> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        // Saturate: an absurd page number must land past the end of the
        // collection, not wrap into it.
        let offset = (page - 1).saturating_mul(per_page);
        let items = self.repo.page(&filter, per_page, offset).await?;
        let total = self.repo.count(&filter).await?;
        Ok(Page::new(items, total, page, per_page))
    }

    /// Up to [`FEATURED_LIMIT`] published articles by view count, recency
    /// breaking ties.
    pub async fn list_featured(&self) -> Result<Vec<Article>> {
        self.repo.most_viewed(FEATURED_LIMIT).await
    }

    /// Exact slug lookup. A hit counts as a read: the view counter is bumped
    /// atomically and the updated document is returned. Publication state is
    /// not consulted, so a draft stays reachable by its direct slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Article> {
        self.repo
            .bump_views(slug)
            .await?
            .ok_or_else(|| AppError::article_not_found(slug))
    }

    pub async fn create(&self, author: &Principal, draft: ArticleDraft) -> Result<Article> {
        let missing = missing_fields(&draft);
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let title = draft.title.trim().to_owned();
        check_title_length(&title)?;
        let category = Category::from_str(draft.category.trim())?;
        let reading_time = match draft.reading_time {
            Some(minutes) => check_reading_time(minutes)?,
            None => Article::DEFAULT_READING_TIME,
        };

        let now = Utc::now();
        let article = Article {
            id: Uuid::now_v7(),
            slug: slug::derive(&title, now),
            title,
            description: draft.description,
            content: draft.content,
            image: draft.image,
            category,
            author_id: author.id,
            author_name: author.name.clone(),
            views: 0,
            is_published: true,
            is_featured: false,
            tags: split_tags(draft.tags.as_deref().unwrap_or_default()),
            reading_time,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(&article).await?;
        tracing::info!(article = %article.id, slug = %article.slug, "article created");
        Ok(article)
    }

    /// Partial update. Absent fields keep their current value; a field that
    /// is present but empty is a validation error rather than a silent skip.
    /// The slug and author fields never change here.
    pub async fn update(
        &self,
        requester: &Principal,
        id: Uuid,
        changes: ArticleUpdate,
    ) -> Result<Article> {
        let mut article = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::article_not_found(id.to_string()))?;

        if article.author_id != requester.id {
            return Err(AppError::Forbidden(
                "only the author may modify this article".into(),
            ));
        }

        if changes.is_empty() {
            // Nothing to write; mirror a no-op save.
            return Ok(article);
        }

        if let Some(title) = changes.title {
            let title = title.trim().to_owned();
            if title.is_empty() {
                return Err(AppError::Validation("title cannot be empty".into()));
            }
            check_title_length(&title)?;
            // The slug keeps pointing at the original title on purpose: it is
            // the document's public identity once created.
            article.title = title;
        }
        if let Some(description) = changes.description {
            article.description = applied("description", description)?;
        }
        if let Some(content) = changes.content {
            article.content = applied("content", content)?;
        }
        if let Some(image) = changes.image {
            article.image = applied("image", image)?;
        }
        if let Some(category) = changes.category {
            if category.trim().is_empty() {
                return Err(AppError::Validation("category cannot be empty".into()));
            }
            article.category = Category::from_str(category.trim())?;
        }
        if let Some(tags) = changes.tags {
            // An explicitly supplied empty string clears the list.
            article.tags = split_tags(&tags);
        }
        if let Some(minutes) = changes.reading_time {
            article.reading_time = check_reading_time(minutes)?;
        }
        article.updated_at = Utc::now();

        if !self.repo.replace(&article).await? {
            // Deleted between the load and the write; surface the same miss.
            return Err(AppError::article_not_found(id.to_string()));
        }
        tracing::info!(article = %article.id, "article updated");
        Ok(article)
    }

    pub async fn delete(&self, requester: &Principal, id: Uuid) -> Result<()> {
        let article = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::article_not_found(id.to_string()))?;

        if article.author_id != requester.id {
            return Err(AppError::Forbidden(
                "only the author may delete this article".into(),
            ));
        }

        if !self.repo.remove(id).await? {
            return Err(AppError::article_not_found(id.to_string()));
        }
        tracing::info!(article = %id, slug = %article.slug, "article deleted");
        Ok(())
    }
}

fn missing_fields(draft: &ArticleDraft) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if draft.title.trim().is_empty() {
        missing.push("title");
    }
    if draft.description.trim().is_empty() {
        missing.push("description");
    }
    if draft.content.trim().is_empty() {
        missing.push("content");
    }
    if draft.image.trim().is_empty() {
        missing.push("image");
    }
    if draft.category.trim().is_empty() {
        missing.push("category");
    }
    missing
}

fn check_title_length(title: &str) -> Result<()> {
    if title.chars().count() > Article::MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "title exceeds {} characters",
            Article::MAX_TITLE_LEN
        )));
    }
    Ok(())
}

fn check_reading_time(minutes: u32) -> Result<u32> {
    if minutes == 0 {
        return Err(AppError::Validation(
            "reading time must be at least 1 minute".into(),
        ));
    }
    Ok(minutes)
}

fn applied(field: &'static str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}

/// Splits the comma-separated editor form into the stored tag list, keeping
/// order, trimming tokens, and dropping empty segments.
fn split_tags(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}
