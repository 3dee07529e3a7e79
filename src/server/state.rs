//! Shared application state handed to every handler

use super::render::Renderer;
use crate::actions::InvoiceActions;
use crate::cache::PageCache;
use crate::core::store::{CustomerStore, InvoiceStore};
use std::sync::Arc;

/// Handles acquired once at startup and cloned into each request
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
    pub invoices: Arc<dyn InvoiceStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub cache: PageCache,
    pub renderer: Renderer,
}
