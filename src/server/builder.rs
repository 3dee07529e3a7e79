//! ServerBuilder for fluent API to build the dashboard server

use super::render::Renderer;
use super::router::build_routes;
use super::state::AppState;
use crate::actions::InvoiceActions;
use crate::cache::PageCache;
use crate::core::clock::{Clock, SystemClock};
use crate::core::store::{CustomerStore, InvoiceStore};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the dashboard router
///
/// # Example
///
/// ```ignore
/// let store = PgStore::connect(&config.database).await?;
/// let app = ServerBuilder::new()
///     .with_store(store)
///     .build()?;
/// ```
pub struct ServerBuilder {
    invoice_store: Option<Arc<dyn InvoiceStore>>,
    customer_store: Option<Arc<dyn CustomerStore>>,
    clock: Arc<dyn Clock>,
    cache: PageCache,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            invoice_store: None,
            customer_store: None,
            clock: Arc::new(SystemClock),
            cache: PageCache::new(),
        }
    }

    /// Use one backend for both invoices and customers
    pub fn with_store<S>(self, store: S) -> Self
    where
        S: InvoiceStore + CustomerStore + 'static,
    {
        let store = Arc::new(store);
        self.with_invoice_store(store.clone())
            .with_customer_store(store)
    }

    /// Set the invoice store (required)
    pub fn with_invoice_store(mut self, store: Arc<dyn InvoiceStore>) -> Self {
        self.invoice_store = Some(store);
        self
    }

    /// Set the customer store (required)
    pub fn with_customer_store(mut self, store: Arc<dyn CustomerStore>) -> Self {
        self.customer_store = Some(store);
        self
    }

    /// Replace the wall clock used for invoice dates
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Share an existing page cache (e.g. to inspect it in tests)
    pub fn with_page_cache(mut self, cache: PageCache) -> Self {
        self.cache = cache;
        self
    }

    /// Assemble the application state
    pub fn build_state(self) -> Result<AppState> {
        let invoices = self
            .invoice_store
            .ok_or_else(|| anyhow::anyhow!("InvoiceStore is required. Call .with_store()"))?;
        let customers = self
            .customer_store
            .ok_or_else(|| anyhow::anyhow!("CustomerStore is required. Call .with_store()"))?;
        let renderer = Renderer::new()?;

        let actions = InvoiceActions::new(
            invoices.clone(),
            Arc::new(self.cache.clone()),
            self.clock,
        );

        Ok(AppState {
            actions,
            invoices,
            customers,
            cache: self.cache,
            renderer,
        })
    }

    /// Build the router with every route and the trace layer
    pub fn build(self) -> Result<Router> {
        let state = self.build_state()?;
        Ok(build_routes(state).layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(all(test, feature = "in-memory"))]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_build_without_stores_fails() {
        let result = ServerBuilder::new().build_state();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_without_customer_store_fails() {
        let result = ServerBuilder::new()
            .with_invoice_store(Arc::new(InMemoryStore::new()))
            .build_state();
        assert!(result.is_err());
    }

    #[test]
    fn test_with_store_sets_both_stores() {
        assert!(
            ServerBuilder::new()
                .with_store(InMemoryStore::new())
                .build_state()
                .is_ok()
        );
    }

    #[test]
    fn test_shared_page_cache_is_used() {
        let cache = PageCache::new();
        let state = ServerBuilder::new()
            .with_store(InMemoryStore::new())
            .with_page_cache(cache.clone())
            .build_state()
            .unwrap();

        assert!(state.cache.insert_if_fresh("/x", 0, "y".into()));
        assert!(cache.contains("/x"));
    }

    #[test]
    fn test_build_produces_router() {
        assert!(
            ServerBuilder::new()
                .with_store(InMemoryStore::new())
                .build()
                .is_ok()
        );
    }
}
