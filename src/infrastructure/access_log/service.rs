//! Access log traits and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::access_event::AccessEvent;

/// Errors raised while recording an access event.
///
/// None of these ever reach the HTTP caller: the resolver reports them on the
/// error log and carries on with the redirect.
#[derive(Debug, Error)]
pub enum AccessLogError {
    #[error("Access log queue is full")]
    QueueFull,

    #[error("Access log queue is closed")]
    QueueClosed,

    #[error("Access log serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Access log backend error: {0}")]
    Backend(String),
}

/// Entry point used by the resolver to hand off an access event.
///
/// Implementations should return quickly; slow persistence belongs behind an
/// [`AccessLogWriter`] driven by the background worker.
///
/// # Implementations
///
/// - [`crate::infrastructure::access_log::ChannelAccessLog`] - bounded queue feeding the worker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogSink: Send + Sync {
    async fn record(&self, event: AccessEvent) -> Result<(), AccessLogError>;
}

/// Persists access events. Called from [`crate::domain::access_worker`].
///
/// # Implementations
///
/// - [`crate::infrastructure::access_log::RedisAccessLogWriter`] - appends JSON entries to a Redis list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogWriter: Send + Sync {
    async fn write(&self, event: &AccessEvent) -> Result<(), AccessLogError>;
}
