//! Handlers for the news catalogue.
//!
//! Listing endpoints are public and paginated; mutations require a verified
//! principal and, beyond creation, ownership of the targeted article.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use domains::{AppError, Article, ArticleDraft, ArticleUpdate, Category};
use serde::Deserialize;
use uuid::Uuid;

use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthPrincipal;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
}

fn parse_category(raw: Option<&str>) -> ApiResult<Option<Category>> {
    match raw {
        Some(name) => Ok(Some(name.parse::<Category>()?)),
        None => Ok(None),
    }
}

/// A malformed id cannot name any article, so it reads as a miss rather
/// than a validation failure.
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError(AppError::article_not_found(raw)))
}

/// Lists published articles (`GET /api/news`), optionally `?category=`,
/// paginated.
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Envelope<Vec<Article>>>> {
    let category = parse_category(query.category.as_deref())?;
    let (page, per_page) = state.pages.resolve(query.page, query.limit);
    let listed = state.articles.list_published(category, page, per_page).await?;
    Ok(Json(Envelope::paged(listed)))
}

/// The most-viewed published articles (`GET /api/news/top`).
pub async fn top_news(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<Article>>>> {
    Ok(Json(Envelope::data(state.articles.list_featured().await?)))
}

/// One category's published articles, paginated
/// (`GET /api/news/category/{category}`).
pub async fn news_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Envelope<Vec<Article>>>> {
    let category = category.parse::<Category>()?;
    let (page, per_page) = state.pages.resolve(query.page, query.limit);
    let listed = state
        .articles
        .list_published(Some(category), page, per_page)
        .await?;
    Ok(Json(Envelope::paged(listed)))
}

/// The caller's own articles, drafts included (`GET /api/news/user/news`).
pub async fn user_news(
    State(state): State<AppState>,
    AuthPrincipal(me): AuthPrincipal,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Envelope<Vec<Article>>>> {
    let (page, per_page) = state.pages.resolve(query.page, query.limit);
    let listed = state.articles.list_by_author(&me, page, per_page).await?;
    Ok(Json(Envelope::paged(listed)))
}

/// A single article by slug (`GET /api/news/{slug}`); the fetch counts
/// as a view.
pub async fn news_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Envelope<Article>>> {
    Ok(Json(Envelope::data(state.articles.get_by_slug(&slug).await?)))
}

/// Creates an article (`POST /api/news`); the slug is derived server-side.
pub async fn create_news(
    State(state): State<AppState>,
    AuthPrincipal(author): AuthPrincipal,
    Json(draft): Json<ArticleDraft>,
) -> ApiResult<(StatusCode, Json<Envelope<Article>>)> {
    let article = state.articles.create(&author, draft).await?;
    Ok((StatusCode::CREATED, Json(Envelope::data(article))))
}

/// Applies a partial update, owner only (`PUT /api/news/{id}`).
pub async fn update_news(
    State(state): State<AppState>,
    AuthPrincipal(me): AuthPrincipal,
    Path(id): Path<String>,
    Json(changes): Json<ArticleUpdate>,
) -> ApiResult<Json<Envelope<Article>>> {
    let id = parse_id(&id)?;
    let article = state.articles.update(&me, id, changes).await?;
    Ok(Json(Envelope::data(article)))
}

/// Deletes an article, owner only (`DELETE /api/news/{id}`).
pub async fn delete_news(
    State(state): State<AppState>,
    AuthPrincipal(me): AuthPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let id = parse_id(&id)?;
    state.articles.delete(&me, id).await?;
    Ok(Json(Envelope::message("News deleted successfully")))
}
