//! Route table of the dashboard

use super::handlers::{create_invoice, delete_invoice, update_invoice};
use super::pages::{customers_json, customers_page, invoices_page};
use super::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Build the dashboard routes
///
/// - GET  /dashboard/invoices - Invoices listing (cached)
/// - POST /dashboard/invoices/create - Create an invoice from a form
/// - POST /dashboard/invoices/{id}/edit - Update an invoice from a form
/// - POST /dashboard/invoices/{id}/delete - Delete an invoice
/// - GET  /dashboard/customers - Customers table filtered by `query`
/// - GET  /api/customers - Same list as JSON
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/dashboard/invoices", get(invoices_page))
        .route("/dashboard/invoices/create", post(create_invoice))
        .route("/dashboard/invoices/{id}/edit", post(update_invoice))
        .route("/dashboard/invoices/{id}/delete", post(delete_invoice))
        .route("/dashboard/customers", get(customers_page))
        .route("/api/customers", get(customers_json))
        .with_state(state)
}
