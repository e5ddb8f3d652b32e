//! Queue-backed access log sink.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::service::{AccessLogError, AccessLogSink};
use crate::domain::access_event::AccessEvent;

/// Sink that pushes events onto a bounded channel drained by
/// [`crate::domain::access_worker::run_access_log_worker`].
///
/// Never waits for capacity: a full queue is reported as
/// [`AccessLogError::QueueFull`] and the event is dropped.
#[derive(Debug, Clone)]
pub struct ChannelAccessLog {
    tx: mpsc::Sender<AccessEvent>,
}

impl ChannelAccessLog {
    pub fn new(tx: mpsc::Sender<AccessEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiving end for the worker.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<AccessEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Remaining free slots in the queue.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }
}

#[async_trait]
impl AccessLogSink for ChannelAccessLog {
    async fn record(&self, event: AccessEvent) -> Result<(), AccessLogError> {
        self.tx.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => AccessLogError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => AccessLogError::QueueClosed,
        })
    }
}
