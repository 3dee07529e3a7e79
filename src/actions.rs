//! Invoice mutations triggered by dashboard forms
//!
//! Each action validates its input, issues exactly one statement and then
//! either redirects to the invoices listing or answers with a message.
//!
//! Failure handling is split on purpose:
//! - a [`ValidationError`] is returned before the store is touched;
//! - a [`StoreError`] is logged with its full detail and replaced by a fixed
//!   message, so the request never fails because of the database.

use crate::cache::Revalidator;
use crate::core::clock::Clock;
use crate::core::error::{StoreError, ValidationError};
use crate::core::store::InvoiceStore;
use crate::core::validation::{FormPayload, InvoiceForm};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Path of the invoices listing view
pub const INVOICES_PATH: &str = "/dashboard/invoices";

pub const CREATE_FAILED: &str = "Database Error: Failed to Create Invoice.";
pub const UPDATE_FAILED: &str = "Database Error: Failed to Update Invoice.";
pub const DELETE_FAILED: &str = "Database Error: Failed to Delete Invoice.";
pub const DELETED: &str = "Deleted Invoice.";

/// `{ "message": "..." }` answer of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMessage {
    pub message: String,
}

impl ActionMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a create or update once the input passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The statement succeeded; navigate to this path
    Redirect(String),
    /// The store failed; show this message
    Failed(ActionMessage),
}

/// The three invoice actions bound to their collaborators
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    revalidator: Arc<dyn Revalidator>,
    clock: Arc<dyn Clock>,
}

impl InvoiceActions {
    pub fn new(
        store: Arc<dyn InvoiceStore>,
        revalidator: Arc<dyn Revalidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            revalidator,
            clock,
        }
    }

    /// Validate the form and insert a new invoice dated today
    pub async fn create_invoice(
        &self,
        form: &FormPayload,
    ) -> Result<ActionOutcome, ValidationError> {
        let invoice = InvoiceForm::parse(form)?.into_new_invoice(self.clock.today());
        tracing::debug!(
            customer_id = %invoice.customer_id,
            amount = invoice.amount,
            status = %invoice.status,
            date = %invoice.date_string(),
            "creating invoice"
        );

        let result = self.store.insert(invoice).await.map(|id| {
            tracing::info!(invoice_id = %id, "invoice created");
        });

        Ok(self.finish(guard("create", result, CREATE_FAILED)))
    }

    /// Validate the form and update customer, amount and status of `id`
    pub async fn update_invoice(
        &self,
        id: &str,
        form: &FormPayload,
    ) -> Result<ActionOutcome, ValidationError> {
        let changes = InvoiceForm::parse(form)?.into_changes();

        let result = self.store.update(id, changes).await.map(|()| {
            tracing::info!(invoice_id = %id, "invoice updated");
        });

        Ok(self.finish(guard("update", result, UPDATE_FAILED)))
    }

    /// Delete `id`
    ///
    /// Both branches carry a message; only success revalidates the listing.
    pub async fn delete_invoice(&self, id: &str) -> Result<ActionMessage, ActionMessage> {
        let result = self.store.delete(id).await;
        guard("delete", result, DELETE_FAILED)?;

        tracing::info!(invoice_id = %id, "invoice deleted");
        self.revalidator.revalidate_path(INVOICES_PATH);
        Ok(ActionMessage::new(DELETED))
    }

    fn finish(&self, result: Result<(), ActionMessage>) -> ActionOutcome {
        match result {
            Ok(()) => {
                self.revalidator.revalidate_path(INVOICES_PATH);
                ActionOutcome::Redirect(INVOICES_PATH.to_string())
            }
            Err(message) => ActionOutcome::Failed(message),
        }
    }
}

/// Log a store failure and swap it for the user-facing message
fn guard<T>(
    operation: &str,
    result: Result<T, StoreError>,
    failure: &str,
) -> Result<T, ActionMessage> {
    result.map_err(|e| {
        tracing::error!(operation, error = %e, "invoice {} failed", operation);
        ActionMessage::new(failure)
    })
}
