//! HTTP layer translating requests into resolver calls.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - Redirect fallback and health check
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
