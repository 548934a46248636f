use std::sync::Arc;

use crate::{cache::PageCache, config::MissingRowPolicy, store::InvoiceStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InvoiceStore>,
    pub pages: Arc<dyn PageCache>,
    pub missing_row: MissingRowPolicy,
}

impl AppState {
    pub fn new(
        store: Arc<dyn InvoiceStore>,
        pages: Arc<dyn PageCache>,
        missing_row: MissingRowPolicy,
    ) -> Self {
        Self {
            store,
            pages,
            missing_row,
        }
    }
}
