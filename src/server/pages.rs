//! Read-side pages
//!
//! Any fault while resolving parameters, fetching or rendering is caught at
//! the page boundary: it is logged and the page body becomes a plain-text
//! fallback. Nothing is retried and nothing is partially rendered.

use super::state::AppState;
use crate::actions::INVOICES_PATH;
use crate::core::error::{DashboardError, RenderError};
use crate::core::model::CustomerSummary;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

/// Text shown instead of a page that failed
pub const RENDER_FALLBACK: &str = "Error in server code";

/// Search parameters of the customers page
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    /// Accepted for link compatibility; results are not paginated
    pub page: Option<String>,
}

impl SearchParams {
    /// The filter text; absent means empty (no filtering)
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }
}

/// `GET /dashboard/customers?query=...`
pub async fn customers_page(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    match render_customers(&state, params).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => fallback("customers", e),
    }
}

async fn render_customers(
    state: &AppState,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<String, RenderError> {
    let Query(params) = params.map_err(|e| RenderError::Params {
        message: e.body_text(),
    })?;
    let query = params.query();
    let customers = state.customers.fetch_filtered(query).await?;
    tracing::debug!(query, count = customers.len(), "fetched filtered customers");
    state.renderer.customers(query, &customers)
}

/// `GET /api/customers?query=...`
pub async fn customers_json(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CustomerSummary>>, DashboardError> {
    let customers = state.customers.fetch_filtered(params.query()).await?;
    Ok(Json(customers))
}

/// `GET /dashboard/invoices`
///
/// Served from the page cache until a mutation revalidates the path.
pub async fn invoices_page(State(state): State<AppState>) -> Response {
    if let Some(html) = state.cache.get(INVOICES_PATH) {
        return Html(html).into_response();
    }

    // Taken before the fetch so a mutation landing mid-render is noticed
    let generation = state.cache.generation(INVOICES_PATH);
    match render_invoices(&state).await {
        Ok(html) => {
            state.cache.insert_if_fresh(INVOICES_PATH, generation, html.clone());
            Html(html).into_response()
        }
        Err(e) => fallback("invoices", e),
    }
}

async fn render_invoices(state: &AppState) -> Result<String, RenderError> {
    let invoices = state.invoices.list().await?;
    state.renderer.invoices(&invoices)
}

fn fallback(page: &str, error: RenderError) -> Response {
    tracing::error!(page, error = %error, "page rendering failed");
    (StatusCode::INTERNAL_SERVER_ERROR, RENDER_FALLBACK).into_response()
}
