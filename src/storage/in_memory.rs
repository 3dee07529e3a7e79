//! In-memory implementation of the store traits for testing and development

use crate::core::error::StoreError;
use crate::core::model::{
    Customer, CustomerSummary, Invoice, InvoiceChanges, InvoiceRow, InvoiceStatus, NewInvoice,
};
use crate::core::store::{CustomerStore, InvoiceStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

/// In-memory invoices and customers
///
/// Uses RwLock for thread-safe access. Matching rules mirror the PostgreSQL
/// backend: case-insensitive substring on name or email.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    customers: Arc<RwLock<HashMap<String, Customer>>>,
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a customer
    pub fn add_customer(&self, customer: Customer) -> Result<(), StoreError> {
        let mut customers = self.customers.write().map_err(lock_error)?;
        customers.insert(customer.id.clone(), customer);
        Ok(())
    }

    /// Add or replace an invoice with a caller-chosen id
    pub fn add_invoice(&self, invoice: Invoice) -> Result<(), StoreError> {
        let mut invoices = self.invoices.write().map_err(lock_error)?;
        invoices.insert(invoice.id.clone(), invoice);
        Ok(())
    }

    /// Snapshot of a stored invoice
    pub fn invoice(&self, id: &str) -> Result<Option<Invoice>, StoreError> {
        let invoices = self.invoices.read().map_err(lock_error)?;
        Ok(invoices.get(id).cloned())
    }

    pub fn invoice_count(&self) -> Result<usize, StoreError> {
        let invoices = self.invoices.read().map_err(lock_error)?;
        Ok(invoices.len())
    }
}

fn lock_error<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable {
        backend: BACKEND,
        message: format!("lock poisoned: {}", e),
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<String, StoreError> {
        // Referential integrity is enforced by the store, as the FK does in SQL
        let known = self
            .customers
            .read()
            .map_err(lock_error)?
            .contains_key(&invoice.customer_id);
        if !known {
            return Err(StoreError::Query {
                backend: BACKEND,
                message: format!("unknown customer '{}'", invoice.customer_id),
            });
        }

        let id = Uuid::new_v4().to_string();
        let mut invoices = self.invoices.write().map_err(lock_error)?;
        invoices.insert(
            id.clone(),
            Invoice {
                id: id.clone(),
                customer_id: invoice.customer_id,
                amount: invoice.amount,
                status: invoice.status,
                date: invoice.date,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), StoreError> {
        let known = self
            .customers
            .read()
            .map_err(lock_error)?
            .contains_key(&changes.customer_id);
        if !known {
            return Err(StoreError::Query {
                backend: BACKEND,
                message: format!("unknown customer '{}'", changes.customer_id),
            });
        }

        let mut invoices = self.invoices.write().map_err(lock_error)?;
        let invoice = invoices.get_mut(id).ok_or_else(|| StoreError::NotFound {
            entity: "invoice",
            id: id.to_string(),
        })?;
        invoice.customer_id = changes.customer_id;
        invoice.amount = changes.amount;
        invoice.status = changes.status;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut invoices = self.invoices.write().map_err(lock_error)?;
        invoices
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                entity: "invoice",
                id: id.to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<InvoiceRow>, StoreError> {
        let customers = self.customers.read().map_err(lock_error)?;
        let invoices = self.invoices.read().map_err(lock_error)?;

        let mut rows: Vec<InvoiceRow> = invoices
            .values()
            .filter_map(|inv| {
                customers.get(&inv.customer_id).map(|c| InvoiceRow {
                    id: inv.id.clone(),
                    customer_id: inv.customer_id.clone(),
                    name: c.name.clone(),
                    email: c.email.clone(),
                    image_url: c.image_url.clone(),
                    amount: inv.amount,
                    status: inv.status,
                    date: inv.date,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn fetch_filtered(&self, query: &str) -> Result<Vec<CustomerSummary>, StoreError> {
        let customers = self.customers.read().map_err(lock_error)?;
        let invoices = self.invoices.read().map_err(lock_error)?;
        let needle = query.to_lowercase();

        let mut rows = customers
            .values()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
            })
            .map(|c| {
                let mut summary = CustomerSummary {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    email: c.email.clone(),
                    image_url: c.image_url.clone(),
                    total_invoices: 0,
                    total_pending: 0,
                    total_paid: 0,
                };
                for inv in invoices.values().filter(|i| i.customer_id == c.id) {
                    summary.total_invoices += 1;
                    let total = match inv.status {
                        InvoiceStatus::Pending => &mut summary.total_pending,
                        InvoiceStatus::Paid => &mut summary.total_paid,
                    };
                    // bigint SUM overflow is an error in SQL too
                    *total = total
                        .checked_add(inv.amount)
                        .ok_or_else(|| StoreError::Query {
                            backend: BACKEND,
                            message: format!(
                                "{} total of customer '{}' out of range",
                                inv.status, c.id
                            ),
                        })?;
                }
                Ok(summary)
            })
            .collect::<Result<Vec<CustomerSummary>, StoreError>>()?;
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}
