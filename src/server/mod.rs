//! HTTP server for the dashboard
//!
//! [`ServerBuilder`] wires the stores, the page cache and the clock into an
//! [`AppState`] and returns an axum `Router` with every route registered.

pub mod builder;
pub mod handlers;
pub mod pages;
pub mod render;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use render::Renderer;
pub use state::AppState;
