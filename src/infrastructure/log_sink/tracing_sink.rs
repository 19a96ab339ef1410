//! Local log sink used when no remote endpoint is configured.

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::service::{LogReceipt, LogSink, SinkError};
use crate::domain::log_event::{Level, LogEvent};

/// Writes events to the local `tracing` subscriber instead of the network.
///
/// Always succeeds. `fatal` events are logged at `error` level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        debug!("Using TracingSink (remote log sink disabled)");
        Self
    }
}

#[async_trait]
impl LogSink for TracingSink {
    async fn send(&self, event: &LogEvent) -> Result<LogReceipt, SinkError> {
        let stack = event.stack;
        let package = event.package;
        match event.level {
            Level::Debug => debug!(target: "sink", ?stack, ?package, "{}", event.message),
            Level::Info => info!(target: "sink", ?stack, ?package, "{}", event.message),
            Level::Warn => warn!(target: "sink", ?stack, ?package, "{}", event.message),
            Level::Error | Level::Fatal => {
                error!(target: "sink", ?stack, ?package, level = ?event.level, "{}", event.message)
            }
        }

        Ok(LogReceipt {
            log_id: String::new(),
            message: "logged locally".to_string(),
        })
    }
}
