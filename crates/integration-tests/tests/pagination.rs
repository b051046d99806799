//! Listing pagination through the router, over a deterministically seeded
//! store.

use std::sync::Arc;

use auth_adapters::RejectAllVerifier;
use axum::http::{Method, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use domains::{Article, ArticleRepo, Category};
use integration_tests::web::{app_with_verifier, json_request, send};
use uuid::Uuid;

/// Twenty-five articles a minute apart; `Story 01`..`Story 10` are Sports,
/// the rest Technology.
async fn seeded_app() -> Router {
    let (app, articles, _) = app_with_verifier(Arc::new(RejectAllVerifier));
    let base = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
    for i in 1..=25 {
        let at = base + chrono::Duration::minutes(i);
        let category = if i <= 10 { Category::Sports } else { Category::Technology };
        let article = Article {
            id: Uuid::now_v7(),
            title: format!("Story {i:02}"),
            slug: format!("story-{i:02}-{}", at.timestamp_millis()),
            description: "d".into(),
            content: "c".into(),
            image: "i".into(),
            category,
            author_id: Uuid::now_v7(),
            author_name: "Seed".into(),
            views: 0,
            is_published: true,
            is_featured: false,
            tags: vec![],
            reading_time: 5,
            created_at: at,
            updated_at: at,
        };
        articles.insert(&article).await.unwrap();
    }
    app
}

#[tokio::test]
async fn the_last_page_is_a_short_slice() {
    let app = seeded_app().await;
    let (status, body) = send(&app, json_request(Method::GET, "/api/news?page=3&limit=10", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 5);
    assert_eq!(body["total"], 25);
    assert_eq!(body["pages"], 3);
    assert_eq!(body["currentPage"], 3);
    // Newest first: page 3 of 10 starts at the fifth-oldest story.
    assert_eq!(body["data"][0]["title"], "Story 05");
    assert_eq!(body["data"][4]["title"], "Story 01");
}

#[tokio::test]
async fn pages_past_the_end_are_empty_but_keep_totals() {
    let app = seeded_app().await;
    let (status, body) = send(&app, json_request(Method::GET, "/api/news?page=10&limit=10", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["total"], 25);
    assert_eq!(body["pages"], 3);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn absurd_page_numbers_read_as_past_the_end() {
    let app = seeded_app().await;
    // The largest page an i64 query param can carry; the offset math must
    // not wrap this back onto page one.
    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/news?page=9223372036854775807&limit=10", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["total"], 25);
    assert_eq!(body["pages"], 3);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn missing_parameters_fall_back_to_the_defaults() {
    let app = seeded_app().await;
    let (_, body) = send(&app, json_request(Method::GET, "/api/news", None, None)).await;
    assert_eq!(body["count"], 10);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["data"][0]["title"], "Story 25");
}

#[tokio::test]
async fn oversized_limits_are_clamped() {
    let app = seeded_app().await;
    let (_, body) = send(&app, json_request(Method::GET, "/api/news?limit=100000", None, None)).await;
    // The cap is 100, which still covers all 25.
    assert_eq!(body["count"], 25);
    assert_eq!(body["pages"], 1);
}

#[tokio::test]
async fn category_filters_compose_with_paging() {
    let app = seeded_app().await;
    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/news?category=Sports&limit=4&page=2", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);
    assert_eq!(body["pages"], 3);
    assert_eq!(body["count"], 4);
    assert_eq!(body["data"][0]["title"], "Story 06");

    let (_, by_path) = send(
        &app,
        json_request(Method::GET, "/api/news/category/Sports?limit=4&page=2", None, None),
    )
    .await;
    assert_eq!(by_path["data"], body["data"]);
}

#[tokio::test]
async fn page_zero_clamps_to_the_first_page() {
    let app = seeded_app().await;
    let (_, body) = send(&app, json_request(Method::GET, "/api/news?page=0&limit=5", None, None)).await;
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["data"][0]["title"], "Story 25");
}
