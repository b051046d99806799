//! Router assembly.
//!
//! The caller mounts everything with one call; nothing else about the route
//! table is configurable. `/api/news/{slug}` serves GET by slug alongside
//! PUT/DELETE by id: one registration, because the path shapes are identical
//! and the router must not see two parameter names for the same segment.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{contact, news, system};
use crate::metrics;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/news", get(news::list_news).post(news::create_news))
        .route("/news/top", get(news::top_news))
        .route("/news/category/{category}", get(news::news_by_category))
        .route("/news/user/news", get(news::user_news))
        .route(
            "/news/{slug}",
            get(news::news_by_slug)
                .put(news::update_news)
                .delete(news::delete_news),
        )
        .route(
            "/contact",
            post(contact::submit_contact).get(contact::list_contacts),
        );

    Router::new()
        .nest("/api", api)
        .route("/healthz", get(system::healthz))
        .route("/metrics", get(system::metrics))
        .fallback(system::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            metrics::track_http,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
