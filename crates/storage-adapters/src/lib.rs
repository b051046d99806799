//! newsroom/crates/storage-adapters/src/lib.rs
//!
//! # Storage Adapters
//!
//! Implementations of the storage ports in `domains`. The in-memory store is
//! always compiled; SQLite ships behind the `db-sqlite` feature.

pub mod memory;

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

pub use memory::{InMemoryArticleRepo, InMemoryContactRepo};

#[cfg(feature = "db-sqlite")]
pub use sqlite::{connect, SqliteArticleRepo, SqliteContactRepo};
