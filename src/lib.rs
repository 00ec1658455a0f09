pub mod config;
pub mod models;
pub mod ledger;
pub mod controllers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Shared state for the whole application. Constructed once in main and
// handed to every handler behind an Arc; the ledger inside is the only
// shared mutable resource.
pub struct AppState {
    pub ledger: ledger::Ledger,
    pub config: config::Config,
}

/// Assemble the full application router. Shared by `main` and the HTTP
/// integration tests.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Train Ticket API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
