//! SQLite implementations of the storage ports.
//!
//! Maps between the relational schema and the domain models. Uuids travel as
//! 16-byte blobs, the tag list as a JSON text column. The view counter is
//! bumped inside a single UPDATE..RETURNING statement so concurrent reads
//! never lose an increment.

use std::str::FromStr;

use async_trait::async_trait;
use domains::{
    AppError, Article, ArticleFilter, ArticleRepo, Category, ContactMessage, ContactRepo, Result,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id            BLOB PRIMARY KEY,
    title         TEXT NOT NULL,
    slug          TEXT NOT NULL UNIQUE,
    description   TEXT NOT NULL,
    content       TEXT NOT NULL,
    image         TEXT NOT NULL,
    category      TEXT NOT NULL,
    author_id     BLOB NOT NULL,
    author_name   TEXT NOT NULL,
    views         INTEGER NOT NULL DEFAULT 0,
    is_published  INTEGER NOT NULL DEFAULT 1,
    is_featured   INTEGER NOT NULL DEFAULT 0,
    tags          TEXT NOT NULL DEFAULT '[]',
    reading_time  INTEGER NOT NULL DEFAULT 5,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_articles_category ON articles (category);
CREATE INDEX IF NOT EXISTS idx_articles_author ON articles (author_id);
CREATE INDEX IF NOT EXISTS idx_articles_created ON articles (created_at DESC);

CREATE TABLE IF NOT EXISTS contact_messages (
    id         BLOB PRIMARY KEY,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL,
    subject    TEXT NOT NULL,
    message    TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;

/// Opens (creating if missing) the database at `url` and ensures the schema.
/// Both repo types share the returned pool.
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(db_err)?
        .create_if_missing(true);
    // An in-memory database exists per connection, so it must not be pooled.
    let max_connections = if url.contains(":memory:") { 1 } else { 5 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(db_err)?;
    sqlx::raw_sql(SCHEMA).execute(&pool).await.map_err(db_err)?;
    tracing::debug!(url, "sqlite schema ready");
    Ok(pool)
}

fn db_err(err: sqlx::Error) -> AppError {
    AppError::Internal(err.to_string())
}

// Helper for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Uuid {
    Uuid::from_slice(blob).unwrap_or_default()
}

fn article_from_row(row: &SqliteRow) -> Article {
    Article {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        title: row.get("title"),
        slug: row.get("slug"),
        description: row.get("description"),
        content: row.get("content"),
        image: row.get("image"),
        category: row
            .get::<String, _>("category")
            .parse()
            .unwrap_or(Category::Other),
        author_id: blob_to_uuid(row.get::<Vec<u8>, _>("author_id").as_slice()),
        author_name: row.get("author_name"),
        views: row.get("views"),
        is_published: row.get("is_published"),
        is_featured: row.get("is_featured"),
        tags: serde_json::from_str(&row.get::<String, _>("tags")).unwrap_or_default(),
        reading_time: row.get("reading_time"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn push_filter(sql: &mut String, filter: &ArticleFilter) {
    let mut clauses: Vec<&str> = Vec::new();
    if filter.published_only {
        clauses.push("is_published = 1");
    }
    if filter.category.is_some() {
        clauses.push("category = ?");
    }
    if filter.author.is_some() {
        clauses.push("author_id = ?");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
}

fn bind_filter<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    filter: &ArticleFilter,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    if let Some(category) = filter.category {
        query = query.bind(category.as_str());
    }
    if let Some(author) = filter.author {
        query = query.bind(uuid_to_blob(author));
    }
    query
}

pub struct SqliteArticleRepo {
    pool: SqlitePool,
}

impl SqliteArticleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepo for SqliteArticleRepo {
    async fn insert(&self, article: &Article) -> Result<()> {
        let tags = serde_json::to_string(&article.tags)
            .map_err(|err| AppError::Internal(err.to_string()))?;
        sqlx::query(
            "INSERT INTO articles (id, title, slug, description, content, image, category, \
             author_id, author_name, views, is_published, is_featured, tags, reading_time, \
             created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(article.id))
        .bind(article.title.as_str())
        .bind(article.slug.as_str())
        .bind(article.description.as_str())
        .bind(article.content.as_str())
        .bind(article.image.as_str())
        .bind(article.category.as_str())
        .bind(uuid_to_blob(article.author_id))
        .bind(article.author_name.as_str())
        .bind(article.views)
        .bind(article.is_published)
        .bind(article.is_featured)
        .bind(tags)
        .bind(article.reading_time)
        .bind(article.created_at)
        .bind(article.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(|row| article_from_row(&row)))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(|row| article_from_row(&row)))
    }

    async fn bump_views(&self, slug: &str) -> Result<Option<Article>> {
        // Increment and snapshot in one statement; SQLite serializes writers,
        // so nothing is lost under concurrency.
        let row = sqlx::query("UPDATE articles SET views = views + 1 WHERE slug = ? RETURNING *")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(|row| article_from_row(&row)))
    }

    async fn replace(&self, article: &Article) -> Result<bool> {
        let tags = serde_json::to_string(&article.tags)
            .map_err(|err| AppError::Internal(err.to_string()))?;
        let result = sqlx::query(
            "UPDATE articles SET title = ?, slug = ?, description = ?, content = ?, image = ?, \
             category = ?, author_id = ?, author_name = ?, views = ?, is_published = ?, \
             is_featured = ?, tags = ?, reading_time = ?, created_at = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(article.title.as_str())
        .bind(article.slug.as_str())
        .bind(article.description.as_str())
        .bind(article.content.as_str())
        .bind(article.image.as_str())
        .bind(article.category.as_str())
        .bind(uuid_to_blob(article.author_id))
        .bind(article.author_name.as_str())
        .bind(article.views)
        .bind(article.is_published)
        .bind(article.is_featured)
        .bind(tags)
        .bind(article.reading_time)
        .bind(article.created_at)
        .bind(article.updated_at)
        .bind(uuid_to_blob(article.id))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn page(
        &self,
        filter: &ArticleFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Article>> {
        let mut sql = String::from("SELECT * FROM articles");
        push_filter(&mut sql, filter);
        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query(&sql);
        query = bind_filter(query, filter);
        let rows = query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(article_from_row).collect())
    }

    async fn count(&self, filter: &ArticleFilter) -> Result<u64> {
        let mut sql = String::from("SELECT COUNT(*) AS cnt FROM articles");
        push_filter(&mut sql, filter);

        let mut query = sqlx::query(&sql);
        query = bind_filter(query, filter);
        let row = query.fetch_one(&self.pool).await.map_err(db_err)?;
        Ok(row.get::<i64, _>("cnt") as u64)
    }

    async fn most_viewed(&self, limit: i64) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            "SELECT * FROM articles WHERE is_published = 1 \
             ORDER BY views DESC, created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(article_from_row).collect())
    }
}

pub struct SqliteContactRepo {
    pool: SqlitePool,
}

impl SqliteContactRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepo for SqliteContactRepo {
    async fn insert(&self, message: &ContactMessage) -> Result<()> {
        sqlx::query(
            "INSERT INTO contact_messages (id, name, email, subject, message, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(message.id))
        .bind(message.name.as_str())
        .bind(message.email.as_str())
        .bind(message.subject.as_str())
        .bind(message.message.as_str())
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<ContactMessage>> {
        let rows = sqlx::query("SELECT * FROM contact_messages ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows
            .iter()
            .map(|row| ContactMessage {
                id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
                name: row.get("name"),
                email: row.get("email"),
                subject: row.get("subject"),
                message: row.get("message"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
