//! Remote log sink: event delivery behind a fire-and-forget queue.
//!
//! Producers hand events to [`crate::application::services::EventReporter`],
//! which queues them for [`run_log_worker`]. The worker forwards each event to a
//! [`LogSink`] and only ever logs delivery failures locally.

pub mod http_sink;
pub mod service;
pub mod tracing_sink;
pub mod worker;

pub use http_sink::HttpLogSink;
pub use service::{LogReceipt, LogSink, SinkError};
pub use tracing_sink::TracingSink;
pub use worker::run_log_worker;

#[cfg(test)]
pub use service::MockLogSink;
