//! Shared handler state.

use std::sync::Arc;

use domains::TokenVerifier;
use services::{ArticleService, ContactService};

use crate::metrics::ApiMetrics;

/// Everything a handler can reach. Cloned per request by axum, so all
/// members are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleService,
    pub contact: ContactService,
    pub verifier: Arc<dyn TokenVerifier>,
    pub pages: PageDefaults,
    pub metrics: Arc<ApiMetrics>,
}

impl AppState {
    pub fn new(
        articles: ArticleService,
        contact: ContactService,
        verifier: Arc<dyn TokenVerifier>,
        pages: PageDefaults,
    ) -> Self {
        Self {
            articles,
            contact,
            verifier,
            pages,
            metrics: Arc::new(ApiMetrics::new()),
        }
    }
}

/// Paging knobs from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PageDefaults {
    pub per_page: i64,
    pub max_per_page: i64,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self { per_page: 10, max_per_page: 100 }
    }
}

impl PageDefaults {
    /// Resolves the client's optional `page`/`limit` into effective values.
    /// The page floor and the per-page ceiling are both enforced here, before
    /// the service computes offsets. A missing or non-positive limit means
    /// "use the default", not "as small as possible".
    pub fn resolve(&self, page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
        let page = page.unwrap_or(1).max(1);
        let per_page = match limit {
            Some(n) if n > 0 => n.min(self.max_per_page),
            _ => self.per_page,
        };
        (page, per_page)
    }
}
