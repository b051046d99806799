//! Slug derivation for article URLs.
//!
//! The slug is the article's public lookup key. It is derived exactly once,
//! at creation time, and never recomputed afterwards.

use chrono::{DateTime, Utc};

/// Lower-cases the title and collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, trimming separators at both ends.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut run_broken = false;
    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            if run_broken && !out.is_empty() {
                out.push('-');
            }
            run_broken = false;
            out.push(ch);
        } else {
            run_broken = true;
        }
    }
    out
}

/// Full slug for a new article: the slugified title plus a disambiguating
/// suffix taken from the creation instant, so repeated titles still produce
/// distinct slugs. A title with no usable characters leaves just the suffix.
pub fn derive(title: &str, created_at: DateTime<Utc>) -> String {
    let base = slugify(title);
    let suffix = created_at.timestamp_millis();
    if base.is_empty() {
        suffix.to_string()
    } else {
        format!("{base}-{suffix}")
    }
}
