//! Access logging for resolved slugs.
//!
//! Provides the [`AccessLogSink`] handed to the resolver and the
//! [`AccessLogWriter`] used by the background worker:
//! - [`ChannelAccessLog`] - Bounded queue sink (fire-and-forget)
//! - [`RedisAccessLogWriter`] - Capped Redis list writer

mod channel;
mod redis_writer;
mod service;

pub use channel::ChannelAccessLog;
pub use redis_writer::RedisAccessLogWriter;
pub use service::{AccessLogError, AccessLogSink, AccessLogWriter};

#[cfg(test)]
pub use service::{MockAccessLogSink, MockAccessLogWriter};
