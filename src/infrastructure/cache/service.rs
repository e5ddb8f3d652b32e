//! Link store trait and error types.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during key-value operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read access to the key-value store holding link records.
///
/// Keys are complete (`link:{slug}`); values are JSON documents. The
/// `ttl` argument is a caching hint: implementations may serve a hit from a
/// local copy for up to that long.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisLinkStore`] - Redis with an in-process TTL cache
/// - [`crate::infrastructure::cache::MemoryLinkStore`] - In-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Fetches the JSON value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on hit
    /// - `Ok(None)` when the key does not exist
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend cannot be reached or the stored
    /// value is not valid JSON. The resolver answers these with a server error.
    async fn get(&self, key: &str, ttl: Duration) -> CacheResult<Option<Value>>;

    /// Checks if the backend is healthy.
    async fn health_check(&self) -> bool;
}
