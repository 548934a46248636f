#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::NaiveDate;
use invoice_actions::{
    cache::{CachedPage, InMemoryPageCache, PageCache},
    config::MissingRowPolicy,
    dto::invoices::InvoiceForm,
    models::{INVOICES_PATH, Invoice, InvoiceInput, NewInvoice},
    state::AppState,
    store::{InvoiceStore, StoreError},
};
use uuid::Uuid;

/// In-memory `invoices` table that counts every statement it receives.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Invoice>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent statement fail as if the database were down.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<Invoice> {
        self.rows.lock().unwrap().clone()
    }

    pub fn row(&self, id: &str) -> Option<Invoice> {
        self.rows().into_iter().find(|row| row.id == id)
    }

    /// Seed a row without counting it as a statement.
    pub fn seed(&self, id: &str, customer_id: &str, amount: i64, status: &str, date: NaiveDate) {
        self.rows.lock().unwrap().push(Invoice {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            amount,
            status: status.to_string(),
            date,
        });
    }

    fn begin(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<String, StoreError> {
        self.begin()?;
        let id = Uuid::new_v4().to_string();
        self.rows.lock().unwrap().push(Invoice {
            id: id.clone(),
            customer_id: invoice.customer_id,
            amount: invoice.amount_cents,
            status: invoice.status.as_str().to_string(),
            date: invoice.date,
        });
        Ok(id)
    }

    async fn update(&self, id: &str, input: InvoiceInput) -> Result<u64, StoreError> {
        self.begin()?;
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for row in rows.iter_mut().filter(|row| row.id == id) {
            row.customer_id = input.customer_id.clone();
            row.amount = input.amount_cents;
            row.status = input.status.as_str().to_string();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        self.begin()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        self.begin()?;
        let mut rows = self.rows();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.begin()
    }
}

pub struct Harness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub pages: Arc<InMemoryPageCache>,
}

impl Harness {
    pub fn new(missing_row: MissingRowPolicy) -> Self {
        let store = Arc::new(MemoryStore::new());
        let pages = Arc::new(InMemoryPageCache::new());
        let state = AppState::new(store.clone(), pages.clone(), missing_row);
        Self {
            state,
            store,
            pages,
        }
    }

    /// Put a stale listing in the cache so invalidation is observable.
    pub fn prime_listing(&self) {
        self.pages.put(INVOICES_PATH, CachedPage::new(Vec::new()));
    }

    pub fn listing_cached(&self) -> bool {
        self.pages.get(INVOICES_PATH).is_some()
    }
}

pub fn form(customer_id: &str, amount: &str, status: &str) -> InvoiceForm {
    InvoiceForm {
        customer_id: Some(customer_id.to_string()),
        amount: Some(amount.to_string()),
        status: Some(status.to_string()),
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
