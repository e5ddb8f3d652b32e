//! Utility functions for request handling.
//!
//! - [`query`] - Query string parsing and merging into redirect targets
//! - [`client_ip`] - Client address extraction from headers and peer address

pub mod client_ip;
pub mod query;
