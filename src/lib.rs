//! # Slug Redirect
//!
//! Redirect front end for a URL shortener, built with Axum and Redis.
//!
//! Every request path is resolved into one of:
//!
//! - a redirect to the configured home URL (`/`)
//! - a redirect to an inline base64 target (`/b:{payload}`, http/https only)
//! - a redirect to the URL stored under `link:{slug}` in the key-value store
//! - no action, answered with 404
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Request context, link records, access events
//! - **Resolver** ([`resolver`]) - The redirect resolution algorithm
//! - **Infrastructure Layer** ([`infrastructure`]) - Link stores and access log backends
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! export HOME_URL="https://example.com"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod resolver;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::domain::entities::LinkRecord;
    pub use crate::domain::redirect::RedirectDecision;
    pub use crate::domain::request_context::RequestContext;
    pub use crate::error::AppError;
    pub use crate::resolver::{RedirectResolver, ResolveError, ResolverConfig};
    pub use crate::state::AppState;
}
