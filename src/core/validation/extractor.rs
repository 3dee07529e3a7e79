//! Axum extractor for form-encoded payloads
//!
//! Decoding is the only job here. Schema validation happens inside the
//! actions so that the same rules apply no matter how an action is invoked.

use super::form::FormPayload;
use crate::core::error::ValidationError;
use axum::{
    Form,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};

/// Raw `application/x-www-form-urlencoded` body as string pairs
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create(
///     State(state): State<AppState>,
///     FormData(payload): FormData,
/// ) -> Response {
///     // payload is decoded but not validated yet
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormData(pub FormPayload);

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<FormPayload>::from_request(req, state).await {
            Ok(Form(payload)) => Ok(FormData(payload)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected form payload");
                Err(ValidationError::MalformedForm {
                    message: rejection.body_text(),
                }
                .into_response())
            }
        }
    }
}
