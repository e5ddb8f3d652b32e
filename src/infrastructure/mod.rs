//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Link store abstractions (Redis and in-memory implementations)
//! - [`access_log`] - Access log sink, queue and Redis writer

pub mod access_log;
pub mod cache;
