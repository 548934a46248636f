//! Persistence port for the `invoices` table.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Invoice, InvoiceInput, NewInvoice};

pub mod postgres;

pub use postgres::PgInvoiceStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("orm error: {0}")]
    Orm(#[from] sea_orm::DbErr),

    #[error("invalid identifier `{0}`")]
    InvalidId(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Writer-side contract for invoices. Each method issues exactly one statement.
///
/// `update` and `delete` report the number of affected rows; deciding what
/// zero means is left to the caller.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a row and return the store-assigned id.
    async fn insert(&self, invoice: NewInvoice) -> Result<String, StoreError>;

    /// Set `customer_id`, `amount` and `status` on the row matching `id`.
    async fn update(&self, id: &str, input: InvoiceInput) -> Result<u64, StoreError>;

    async fn delete(&self, id: &str) -> Result<u64, StoreError>;

    /// Every invoice, newest date first.
    async fn list(&self) -> Result<Vec<Invoice>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
