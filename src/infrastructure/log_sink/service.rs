//! Log sink trait and error types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::log_event::LogEvent;

/// Errors that can occur while delivering an event.
///
/// These never reach request handlers; the delivery worker logs them locally.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Log sink request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Log sink returned HTTP {0}")]
    Status(u16),

    #[error("Log sink response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Acknowledgement returned by the sink for an accepted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogReceipt {
    #[serde(rename = "logID")]
    pub log_id: String,
    pub message: String,
}

/// Destination for structured log events.
///
/// # Implementations
///
/// - [`crate::infrastructure::log_sink::HttpLogSink`] - posts events to a remote endpoint
/// - [`crate::infrastructure::log_sink::TracingSink`] - writes events to the local log
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] on network failure, non-success status, or an
    /// unreadable response body.
    async fn send(&self, event: &LogEvent) -> Result<LogReceipt, SinkError>;
}
