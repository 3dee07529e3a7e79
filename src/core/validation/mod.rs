//! Form validation
//!
//! Field rules are small reusable closures (see [`validators`]); the invoice
//! schema in [`form`] combines them into a pure function that returns either
//! typed fields or every field error at once.

pub mod extractor;
pub mod form;
pub mod validators;

pub use extractor::FormData;
pub use form::{FormPayload, InvoiceForm};
