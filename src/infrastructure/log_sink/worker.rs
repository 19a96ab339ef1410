//! Background delivery of log events.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::service::LogSink;
use crate::domain::log_event::LogEvent;

/// Drains the event queue, delivering each event to `sink`.
///
/// Delivery failures are logged and the event is discarded; nothing is retried.
/// The worker exits once every sender has been dropped and the queue is empty.
pub async fn run_log_worker(mut rx: mpsc::Receiver<LogEvent>, sink: Arc<dyn LogSink>) {
    while let Some(event) = rx.recv().await {
        match sink.send(&event).await {
            Ok(receipt) => {
                debug!(log_id = %receipt.log_id, "Log event delivered: {}", receipt.message);
            }
            Err(e) => {
                warn!(error = %e, "Log event delivery failed: {}", event);
            }
        }
    }

    debug!("Log worker stopped");
}
