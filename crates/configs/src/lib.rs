//! newsroom/crates/configs/src/lib.rs
//!
//! # Configuration
//!
//! Layered settings: built-in defaults, then `config/default.toml` and
//! `config/local.toml` when present, then `NEWSROOM_*` environment variables
//! (section and key joined by `__`, e.g. `NEWSROOM_SERVER__PORT=9090`).
//! `load` reads `.env` first so the environment layer sees it.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. `sqlite:newsroom.db` or `sqlite::memory:`.
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    #[serde(deserialize_with = "secret_from_string")]
    pub jwt_secret: SecretString,
    /// Lifetime of tokens issued by the seeding tool.
    pub token_ttl_hours: i64,
}

#[derive(Debug, Deserialize)]
pub struct PaginationConfig {
    pub default_per_page: i64,
    pub max_per_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// tracing env-filter directive, e.g. `info` or `newsroom=debug,info`.
    pub filter: String,
    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
}

fn secret_from_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(SecretString::from(String::deserialize(deserializer)?))
}

pub fn load() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("database.url", "sqlite:newsroom.db")?
        .set_default("auth.jwt_secret", "dev-secret-change-me")?
        .set_default("auth.token_ttl_hours", 24)?
        .set_default("pagination.default_per_page", 10)?
        .set_default("pagination.max_per_page", 100)?
        .set_default("log.filter", "info")?
        .set_default("log.json", false)?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(
            Environment::with_prefix("NEWSROOM")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let app: AppConfig = settings.try_deserialize()?;
    tracing::debug!(addr = %app.server.addr(), "configuration loaded");
    Ok(app)
}
