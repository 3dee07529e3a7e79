//! Typed error handling for the dashboard
//!
//! Three failure families exist and each one is handled at a different layer:
//!
//! - [`ValidationError`]: malformed or missing form fields. Raised before any
//!   store interaction and propagated to the HTTP layer (422).
//! - [`StoreError`]: any fault from the data store. Caught where the statement
//!   is issued and turned into a fixed user-facing message.
//! - [`RenderError`]: faults while resolving parameters, fetching or rendering
//!   a page. Caught at the page boundary and replaced by a text fallback.
//!
//! [`DashboardError`] wraps validation and store errors for places where a
//! single error type is convenient, such as JSON API handlers.
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! match InvoiceForm::parse(&payload) {
//!     Ok(form) => { /* ... */ }
//!     Err(ValidationError::FieldErrors(errors)) => {
//!         for e in errors {
//!             eprintln!("{}: {}", e.field, e.message);
//!         }
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the dashboard
#[derive(Debug)]
pub enum DashboardError {
    /// Form validation errors
    Validation(ValidationError),

    /// Data store errors
    Store(StoreError),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Validation(e) => write!(f, "{}", e),
            DashboardError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Validation(e) => Some(e),
            DashboardError::Store(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DashboardError::Store(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Store(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    ///
    /// Store errors never leak the underlying driver message to clients.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            DashboardError::Store(_) => "Database Error".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            DashboardError::Validation(ValidationError::FieldError { field, message }) => {
                Some(serde_json::json!({ "fields": [{ "field": field, "message": message }] }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        if let DashboardError::Store(e) = &self {
            tracing::error!(error = %e, code = self.error_code(), "store error in API response");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to form validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// The form body could not be decoded
    MalformedForm { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    /// Build an error from collected field errors, collapsing a single one
    pub fn from_fields(mut errors: Vec<FieldValidationError>) -> Self {
        if errors.len() == 1 {
            let e = errors.remove(0);
            ValidationError::FieldError {
                field: e.field,
                message: e.message,
            }
        } else {
            ValidationError::FieldErrors(errors)
        }
    }

    /// Names of every field that failed
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldError { field, .. } => vec![field.as_str()],
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
            ValidationError::MalformedForm { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::MalformedForm { message } => {
                write!(f, "Malformed form payload: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for DashboardError {
    fn from(err: ValidationError) -> Self {
        DashboardError::Validation(err)
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        DashboardError::Validation(self).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the data store collaborators
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The statement matched no row
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// The store rejected the statement (constraint, malformed id, ...)
    #[error("{backend} query error: {message}")]
    Query { backend: &'static str, message: String },

    /// The store could not be reached
    #[error("Storage backend '{backend}' is unavailable: {message}")]
    Unavailable { backend: &'static str, message: String },

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "NOT_FOUND",
            StoreError::Unavailable { .. } => "STORE_UNAVAILABLE",
            _ => "STORE_ERROR",
        }
    }
}

impl From<StoreError> for DashboardError {
    fn from(err: StoreError) -> Self {
        DashboardError::Store(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// Render Errors
// =============================================================================

/// Faults raised while producing a page
#[derive(Debug)]
pub enum RenderError {
    /// Request parameters could not be resolved
    Params { message: String },

    /// The data fetch behind the page failed
    Fetch(StoreError),

    /// Template evaluation failed
    Template { template: String, message: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Params { message } => {
                write!(f, "Failed to resolve request parameters: {}", message)
            }
            RenderError::Fetch(e) => write!(f, "Failed to fetch page data: {}", e),
            RenderError::Template { template, message } => {
                write!(f, "Failed to render template '{}': {}", template, message)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Fetch(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for RenderError {
    fn from(err: StoreError) -> Self {
        RenderError::Fetch(err)
    }
}
