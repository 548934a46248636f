//! Rendered-page cache keyed by route path.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::models::Invoice;

#[derive(Debug, Clone, PartialEq)]
pub struct CachedPage {
    pub invoices: Vec<Invoice>,
    pub rendered_at: DateTime<Utc>,
}

impl CachedPage {
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices,
            rendered_at: Utc::now(),
        }
    }
}

/// Page cache shared by readers and mutations.
///
/// Methods take `&self`; implementations use interior mutability.
pub trait PageCache: Send + Sync {
    fn get(&self, path: &str) -> Option<CachedPage>;

    fn put(&self, path: &str, page: CachedPage);

    /// Revalidation counter for `path`. Read it before rendering and hand it
    /// back to `put_if_generation`.
    fn generation(&self, path: &str) -> u64;

    /// Store `page` only if `path` has not been revalidated since
    /// `generation` was read. Returns whether the page was stored.
    fn put_if_generation(&self, path: &str, generation: u64, page: CachedPage) -> bool;

    /// Mark the cached render of `path` stale. A path that was never cached
    /// is not an error.
    fn revalidate_path(&self, path: &str);
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    page: Option<CachedPage>,
}

#[derive(Debug, Default)]
pub struct InMemoryPageCache {
    slots: DashMap<String, Slot>,
}

impl InMemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of paths holding a cached page.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.page.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PageCache for InMemoryPageCache {
    fn get(&self, path: &str) -> Option<CachedPage> {
        self.slots.get(path).and_then(|slot| slot.page.clone())
    }

    fn put(&self, path: &str, page: CachedPage) {
        self.slots.entry(path.to_string()).or_default().page = Some(page);
    }

    fn generation(&self, path: &str) -> u64 {
        self.slots.get(path).map_or(0, |slot| slot.generation)
    }

    fn put_if_generation(&self, path: &str, generation: u64, page: CachedPage) -> bool {
        // The entry guard holds the shard lock, so a concurrent revalidation
        // lands either before the check or after the store.
        let mut slot = self.slots.entry(path.to_string()).or_default();
        if slot.generation != generation {
            return false;
        }
        slot.page = Some(page);
        true
    }

    fn revalidate_path(&self, path: &str) {
        let mut slot = self.slots.entry(path.to_string()).or_default();
        slot.generation += 1;
        if slot.page.take().is_some() {
            tracing::debug!(path, generation = slot.generation, "revalidated cached page");
        }
    }
}
