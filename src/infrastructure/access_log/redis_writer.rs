//! Redis-backed access log writer.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::debug;

use super::service::{AccessLogError, AccessLogWriter};
use crate::domain::access_event::AccessEvent;

/// Appends access events as JSON documents to a capped Redis list.
///
/// Each write is an atomic `RPUSH` + `LTRIM` pipeline, so the list never
/// grows beyond `max_len` entries.
pub struct RedisAccessLogWriter {
    conn: ConnectionManager,
    key: String,
    max_len: usize,
}

impl RedisAccessLogWriter {
    pub fn new(conn: ConnectionManager, key: impl Into<String>, max_len: usize) -> Self {
        Self {
            conn,
            key: key.into(),
            max_len,
        }
    }
}

#[async_trait]
impl AccessLogWriter for RedisAccessLogWriter {
    async fn write(&self, event: &AccessEvent) -> Result<(), AccessLogError> {
        let payload = serde_json::to_string(event)?;
        let mut conn = self.conn.clone();
        let keep_from = -(self.max_len as isize);

        redis::pipe()
            .atomic()
            .rpush(&self.key, payload)
            .ignore()
            .ltrim(&self.key, keep_from, -1)
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| AccessLogError::Backend(e.to_string()))?;

        debug!(slug = %event.slug, key = %self.key, "Access log entry written");
        Ok(())
    }
}
