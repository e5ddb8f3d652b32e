//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /api/health` - Health check: link store, access log queue
//! - everything else   - Redirect resolution (router fallback)
//!
//! Paths are not normalized by middleware: the resolver strips the
//! surrounding slashes itself and `/` must stay distinguishable for the
//! home redirect.

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .fallback(redirect_handler)
        .with_state(state)
        .layer(tracing::layer())
}
