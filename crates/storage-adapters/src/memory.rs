//! In-process article and contact stores backed by [`DashMap`].
//!
//! The default store for development and tests. DashMap locks per shard, so
//! mutating one entry in place is an atomic read-modify-write with respect to
//! every other caller of that entry; the view-counter contract falls out of
//! that for free.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domains::{
    AppError, Article, ArticleFilter, ArticleRepo, ContactMessage, ContactRepo, Result,
};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryArticleRepo {
    by_id: DashMap<Uuid, Article>,
    /// Slug index. Writers reserve a slug through its entry lock, so the
    /// uniqueness check and the write are a single step.
    slugs: DashMap<String, Uuid>,
}

impl InMemoryArticleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn id_for_slug(&self, slug: &str) -> Option<Uuid> {
        self.slugs.get(slug).map(|entry| *entry.value())
    }

    fn matching(&self, filter: &ArticleFilter) -> Vec<Article> {
        let mut items: Vec<Article> = self
            .by_id
            .iter()
            .filter(|entry| filter_matches(filter, entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        sort_newest_first(&mut items);
        items
    }
}

fn filter_matches(filter: &ArticleFilter, article: &Article) -> bool {
    if filter.published_only && !article.is_published {
        return false;
    }
    if let Some(category) = filter.category {
        if article.category != category {
            return false;
        }
    }
    if let Some(author) = filter.author {
        if article.author_id != author {
            return false;
        }
    }
    true
}

fn sort_newest_first(items: &mut [Article]) {
    // v7 ids are time-ordered, which settles equal timestamps.
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl ArticleRepo for InMemoryArticleRepo {
    async fn insert(&self, article: &Article) -> Result<()> {
        // The entry holds its shard lock for the whole arm, so two inserts
        // racing on one slug cannot both pass the vacancy check.
        match self.slugs.entry(article.slug.clone()) {
            Entry::Occupied(_) => Err(AppError::Internal(format!(
                "slug already exists: {}",
                article.slug
            ))),
            Entry::Vacant(slot) => {
                self.by_id.insert(article.id, article.clone());
                slot.insert(article.id);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>> {
        Ok(self.by_id.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        Ok(self
            .id_for_slug(slug)
            .and_then(|id| self.by_id.get(&id))
            .map(|entry| entry.value().clone()))
    }

    async fn bump_views(&self, slug: &str) -> Result<Option<Article>> {
        let Some(id) = self.id_for_slug(slug) else {
            return Ok(None);
        };
        // get_mut holds the shard lock, so the increment and the snapshot
        // are one atomic step.
        Ok(self.by_id.get_mut(&id).map(|mut entry| {
            entry.views += 1;
            entry.clone()
        }))
    }

    async fn replace(&self, article: &Article) -> Result<bool> {
        let Some(previous_slug) = self.by_id.get(&article.id).map(|entry| entry.slug.clone())
        else {
            return Ok(false);
        };

        if previous_slug != article.slug {
            // Reserve the new slug before the overwrite; a slug held by
            // another document is the same violation the unique index throws.
            match self.slugs.entry(article.slug.clone()) {
                Entry::Occupied(taken) if *taken.get() != article.id => {
                    return Err(AppError::Internal(format!(
                        "slug already exists: {}",
                        article.slug
                    )));
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(article.id);
                }
            }
            self.slugs.remove_if(&previous_slug, |_, id| *id == article.id);
        }

        match self.by_id.get_mut(&article.id) {
            Some(mut entry) => {
                *entry = article.clone();
                Ok(true)
            }
            None => {
                // Lost a race with remove; give back the reservation.
                self.slugs.remove_if(&article.slug, |_, id| *id == article.id);
                Ok(false)
            }
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        match self.by_id.remove(&id) {
            Some((_, article)) => {
                self.slugs.remove_if(&article.slug, |_, mapped| *mapped == id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn page(
        &self,
        filter: &ArticleFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Article>> {
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: &ArticleFilter) -> Result<u64> {
        Ok(self
            .by_id
            .iter()
            .filter(|entry| filter_matches(filter, entry.value()))
            .count() as u64)
    }

    async fn most_viewed(&self, limit: i64) -> Result<Vec<Article>> {
        let mut items = self.matching(&ArticleFilter::published(None));
        items.sort_by(|a, b| {
            b.views
                .cmp(&a.views)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryContactRepo {
    messages: DashMap<Uuid, ContactMessage>,
}

impl InMemoryContactRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepo for InMemoryContactRepo {
    async fn insert(&self, message: &ContactMessage) -> Result<()> {
        self.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<ContactMessage>> {
        let mut items: Vec<ContactMessage> =
            self.messages.iter().map(|entry| entry.value().clone()).collect();
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(items)
    }
}
