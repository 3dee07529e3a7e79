//! HTTP handlers for the invoice mutations
//!
//! Form posts land here; the handler decodes the body and delegates to
//! [`InvoiceActions`](crate::actions::InvoiceActions).
//!
//! - create/update: `303 See Other` to the listing, or `500 {message}`
//! - delete: `200 {message}` or `500 {message}`
//! - invalid input: `422` with the field errors

use super::state::AppState;
use crate::actions::{ActionMessage, ActionOutcome};
use crate::core::validation::FormData;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

pub async fn create_invoice(
    State(state): State<AppState>,
    FormData(form): FormData,
) -> Response {
    match state.actions.create_invoice(&form).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => e.into_response(),
    }
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormData(form): FormData,
) -> Response {
    match state.actions.update_invoice(&id, &form).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_invoice(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.actions.delete_invoice(&id).await {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(message) => failed(message),
    }
}

fn outcome_response(outcome: ActionOutcome) -> Response {
    match outcome {
        ActionOutcome::Redirect(path) => Redirect::to(&path).into_response(),
        ActionOutcome::Failed(message) => failed(message),
    }
}

fn failed(message: ActionMessage) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(message)).into_response()
}
