//! # Newsroom Binary
//!
//! The entry point that assembles the application based on compile-time
//! features and serves it.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, AppState, PageDefaults};
use services::{ArticleService, ContactService};
use tracing_subscriber::EnvFilter;

#[cfg(not(feature = "web-axum"))]
compile_error!("the newsroom binary requires the `web-axum` feature");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configs::load().context("loading configuration")?;
    init_tracing(&config);

    // 1. Storage
    #[cfg(feature = "db-sqlite")]
    let (article_repo, contact_repo): (
        Arc<dyn domains::ArticleRepo>,
        Arc<dyn domains::ContactRepo>,
    ) = {
        let pool = storage_adapters::connect(&config.database.url)
            .await
            .context("opening the database")?;
        (
            Arc::new(storage_adapters::SqliteArticleRepo::new(pool.clone())),
            Arc::new(storage_adapters::SqliteContactRepo::new(pool)),
        )
    };
    #[cfg(not(feature = "db-sqlite"))]
    let (article_repo, contact_repo): (
        Arc<dyn domains::ArticleRepo>,
        Arc<dyn domains::ContactRepo>,
    ) = {
        tracing::warn!("no database backend compiled in; articles live in process memory");
        (
            Arc::new(storage_adapters::InMemoryArticleRepo::new()),
            Arc::new(storage_adapters::InMemoryContactRepo::new()),
        )
    };

    // 2. Auth
    #[cfg(feature = "auth-jwt")]
    let verifier: Arc<dyn domains::TokenVerifier> =
        Arc::new(auth_adapters::JwtTokenVerifier::new(&config.auth.jwt_secret));
    #[cfg(not(feature = "auth-jwt"))]
    let verifier: Arc<dyn domains::TokenVerifier> = {
        tracing::warn!("no auth backend compiled in; every token will be rejected");
        Arc::new(auth_adapters::RejectAllVerifier)
    };

    // 3. Services and the HTTP surface
    let state = AppState::new(
        ArticleService::new(article_repo),
        ContactService::new(contact_repo),
        verifier,
        PageDefaults {
            per_page: config.pagination.default_per_page,
            max_per_page: config.pagination.max_per_page,
        },
    );
    let app = router(state);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "newsroom listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

fn init_tracing(config: &configs::AppConfig) {
    let filter =
        EnvFilter::try_new(&config.log.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for the shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
