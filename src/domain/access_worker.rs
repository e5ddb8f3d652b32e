//! Background worker persisting access events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{error, info};

use crate::domain::access_event::AccessEvent;
use crate::infrastructure::access_log::AccessLogWriter;

/// Retries after the first failed write.
const WRITE_RETRIES: usize = 3;

/// Drains the access event queue until every sender is dropped.
///
/// Each event is written through `writer` with exponential backoff. An event
/// that still fails after [`WRITE_RETRIES`] retries is logged and dropped; the
/// worker itself never stops on a write error.
pub async fn run_access_log_worker(
    mut rx: mpsc::Receiver<AccessEvent>,
    writer: Arc<dyn AccessLogWriter>,
) {
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .map(jitter)
            .take(WRITE_RETRIES);

        let result = Retry::start(strategy, || writer.write(&event)).await;

        if let Err(e) = result {
            metrics::counter!("access_log_failures_total").increment(1);
            error!(slug = %event.slug, "Failed write access log: {}", e);
        }
    }

    info!("Access log worker stopped");
}
