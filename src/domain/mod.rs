//! Domain layer containing request and link models.
//!
//! # Architecture
//!
//! - [`entities`] - Stored data structures
//! - [`request_context`] - Per-request state handed to the resolver
//! - [`redirect`] - Resolution outcome
//! - [`access_event`] - Access log event model
//! - [`access_worker`] - Asynchronous access log worker
//!
//! # Access Logging Flow
//!
//! 1. The resolver matches a slug and attaches its [`entities::LinkRecord`]
//! 2. An [`access_event::AccessEvent`] is handed to the sink on a detached task
//! 3. [`access_worker::run_access_log_worker`] persists queued events with retry

pub mod access_event;
pub mod access_worker;
pub mod entities;
pub mod redirect;
pub mod request_context;
