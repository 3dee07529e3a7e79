//! Core module containing the domain model, validation and collaborator traits

pub mod clock;
pub mod error;
pub mod model;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DashboardError, RenderError, StoreError, ValidationError};
pub use model::{Customer, CustomerSummary, Invoice, InvoiceRow, InvoiceStatus};
pub use store::{CustomerStore, InvoiceStore};
