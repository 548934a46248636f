mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{MemoryStore, form};
use invoice_actions::{
    cache::{InMemoryPageCache, PageCache},
    config::MissingRowPolicy,
    models::{INVOICES_PATH, Invoice, InvoiceInput, NewInvoice},
    services::invoice_service::{create_invoice, list_invoices},
    state::AppState,
    store::{InvoiceStore, StoreError},
};
use tokio::sync::Notify;

/// Store whose `list` takes its snapshot, then waits for `release` before returning.
struct SlowListStore {
    inner: MemoryStore,
    snapshot_taken: Notify,
    release: Notify,
}

#[async_trait]
impl InvoiceStore for SlowListStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<String, StoreError> {
        self.inner.insert(invoice).await
    }

    async fn update(&self, id: &str, input: InvoiceInput) -> Result<u64, StoreError> {
        self.inner.update(id, input).await
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        self.inner.delete(id).await
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let snapshot = self.inner.list().await?;
        self.snapshot_taken.notify_one();
        self.release.notified().await;
        Ok(snapshot)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

#[tokio::test]
async fn listing_read_overlapping_a_create_is_not_cached() {
    let store = Arc::new(SlowListStore {
        inner: MemoryStore::new(),
        snapshot_taken: Notify::new(),
        release: Notify::new(),
    });
    let pages = Arc::new(InMemoryPageCache::new());
    let state = AppState::new(store.clone(), pages.clone(), MissingRowPolicy::Ignore);

    let (stale, created) = tokio::join!(list_invoices(&state), async {
        store.snapshot_taken.notified().await;
        let created = create_invoice(&state, form("c1", "12.50", "paid")).await;
        store.release.notify_one();
        created
    });

    created.expect("create succeeds");
    let stale = stale.expect("listing succeeds");
    assert!(stale.data.unwrap().items.is_empty(), "snapshot predates the create");
    assert!(
        pages.get(INVOICES_PATH).is_none(),
        "snapshot taken before the create must not be cached"
    );

    // The next read renders again and sees the new row.
    let (fresh, ()) = tokio::join!(list_invoices(&state), async {
        store.snapshot_taken.notified().await;
        store.release.notify_one();
    });
    let items = fresh.expect("listing succeeds").data.unwrap().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].amount, 1250);
    assert!(pages.get(INVOICES_PATH).is_some());
}
