//! newsroom/crates/services/src/lib.rs
//!
//! # Services
//!
//! The application layer. Each service owns one slice of behavior, talks to
//! storage through the port traits in `domains`, and knows nothing about HTTP.

pub mod article;
pub mod contact;
pub mod slug;

pub use article::{ArticleService, FEATURED_LIMIT};
pub use contact::ContactService;
