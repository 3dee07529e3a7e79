//! Store traits for invoices and customers
//!
//! The dashboard is agnostic to the underlying storage mechanism. Every
//! method maps to exactly one statement against the store; atomicity and
//! isolation are the store's responsibility.

use crate::core::error::StoreError;
use crate::core::model::{CustomerSummary, InvoiceChanges, InvoiceRow, NewInvoice};
use async_trait::async_trait;

/// Write access to the invoices collection plus the listing read
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new row; the store generates the identifier
    async fn insert(&self, invoice: NewInvoice) -> Result<String, StoreError>;

    /// Update customer, amount and status of the row with this id
    ///
    /// Fails with [`StoreError::NotFound`] when no row matched.
    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), StoreError>;

    /// Remove the row with this id
    ///
    /// Fails with [`StoreError::NotFound`] when no row matched.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Every invoice joined with its customer, newest first
    async fn list(&self) -> Result<Vec<InvoiceRow>, StoreError>;
}

/// Read access to customers
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Customers whose name or email contains `query` (case-insensitive)
    ///
    /// An empty query matches every customer. Results are ordered by name.
    async fn fetch_filtered(&self, query: &str) -> Result<Vec<CustomerSummary>, StoreError>;
}
