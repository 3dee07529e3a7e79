//! # Invoice Dashboard
//!
//! A server-rendered admin dashboard for invoices and customers.
//!
//! ## Features
//!
//! - **Form Actions**: create, update and delete invoices from form posts,
//!   each issuing exactly one SQL statement
//! - **Fixed Schema Validation**: `customerId`, `amount`, `status` checked and
//!   coerced before the store is touched; every failing field is reported
//! - **Minor Units**: amounts are stored as integer cents
//! - **Soft Store Failures**: database errors are logged and turned into a
//!   user-facing message instead of failing the request
//! - **Filtered Customers**: a customers table filtered by free text
//! - **Path Revalidation**: the invoices listing is cached until a mutation
//!   marks it stale
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let store = PgStore::connect(&config.database).await?;
//! store.run_migrations().await?;
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod actions;
pub mod cache;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Actions ===
    pub use crate::actions::{ActionMessage, ActionOutcome, INVOICES_PATH, InvoiceActions};

    // === Core ===
    pub use crate::core::{
        clock::{Clock, FixedClock, SystemClock},
        error::{
            DashboardError, FieldValidationError, RenderError, StoreError, ValidationError,
        },
        model::{
            Customer, CustomerSummary, Invoice, InvoiceChanges, InvoiceRow, InvoiceStatus,
            NewInvoice,
        },
        store::{CustomerStore, InvoiceStore},
        validation::{FormData, FormPayload, InvoiceForm},
    };

    // === Cache ===
    pub use crate::cache::{PageCache, Revalidator};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PgStore;

    // === Config ===
    pub use crate::config::DashboardConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
