//! # Seed Tool
//!
//! Fills the configured database with one sample article per category and
//! prints a signed author token for exercising the protected routes.

use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;
use domains::{ArticleDraft, Principal};
use services::ArticleService;
use uuid::Uuid;

const SAMPLES: [(&str, &str, &str); 8] = [
    ("Compiler Update Lands With Faster Builds", "Technology", "rust, tooling"),
    ("City Marathon Breaks Attendance Record", "Sports", "running, local"),
    ("Chip Maker Posts Surprise Quarterly Profit", "Business", "markets, earnings"),
    ("Festival Lineup Announced For The Summer", "Entertainment", "music, festival"),
    ("New Guidance On Screen Time For Teens", "Health", "wellbeing, research"),
    ("Council Approves The Riverside Budget", "Politics", "council, budget"),
    ("Probe Returns First Images From The Belt", "Science", "space, imaging"),
    ("Community Garden Opens Its Tenth Plot", "Other", "community"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = configs::load().context("loading configuration")?;

    let pool = storage_adapters::connect(&config.database.url)
        .await
        .context("opening the database")?;
    let articles = ArticleService::new(Arc::new(storage_adapters::SqliteArticleRepo::new(pool)));

    let author = Principal { id: Uuid::now_v7(), name: "Seed Author".into() };

    for (title, category, tags) in SAMPLES {
        let draft = ArticleDraft {
            title: title.to_string(),
            description: format!("{title}, in brief."),
            content: format!("{title}. Full coverage to follow."),
            image: format!("https://img.example/{}.jpg", category.to_lowercase()),
            category: category.to_string(),
            tags: Some(tags.to_string()),
            reading_time: None,
        };
        let article = articles.create(&author, draft).await?;
        tracing::info!(slug = %article.slug, "seeded");
    }

    let token = auth_adapters::issue_token(
        &config.auth.jwt_secret,
        &author,
        Duration::hours(config.auth.token_ttl_hours),
    )?;
    println!("seeded {} articles as {}", SAMPLES.len(), author.name);
    println!("author token, valid {}h:", config.auth.token_ttl_hours);
    println!("{token}");
    Ok(())
}
