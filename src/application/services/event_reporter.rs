//! Fire-and-forget front end for the remote log sink.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::log_event::{Level, LogEvent, Package, Stack};
use crate::infrastructure::log_sink::{LogSink, run_log_worker};

/// Queues structured events for background delivery.
///
/// Reporting never blocks and never fails: if the queue is full the event is
/// dropped with a local warning, and if the worker has stopped the event is
/// silently discarded. Cloning is cheap; all clones feed the same queue.
#[derive(Clone, Debug)]
pub struct EventReporter {
    stack: Stack,
    tx: Option<mpsc::Sender<LogEvent>>,
}

impl EventReporter {
    /// Creates a reporter feeding `tx`.
    pub fn new(stack: Stack, tx: mpsc::Sender<LogEvent>) -> Self {
        Self {
            stack,
            tx: Some(tx),
        }
    }

    /// Creates a reporter that discards every event.
    pub fn disabled(stack: Stack) -> Self {
        Self { stack, tx: None }
    }

    /// Creates a reporter together with a spawned worker delivering to `sink`.
    ///
    /// The worker finishes after every clone of the reporter is dropped.
    pub fn spawn(
        stack: Stack,
        sink: Arc<dyn LogSink>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let handle = tokio::spawn(run_log_worker(rx, sink));
        (Self::new(stack, tx), handle)
    }

    pub fn stack(&self) -> Stack {
        self.stack
    }

    /// Returns false when the reporter is disabled or its worker is gone.
    pub fn is_active(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Remaining queue capacity, if the reporter is enabled.
    pub fn capacity(&self) -> Option<usize> {
        self.tx.as_ref().map(|tx| tx.capacity())
    }

    pub fn report(&self, level: Level, package: Package, message: impl Into<String>) {
        let Some(tx) = &self.tx else {
            return;
        };

        if !package.allowed_for(self.stack) {
            debug!(?package, stack = ?self.stack, "Package tag not listed for this stack");
        }

        let event = LogEvent::new(self.stack, level, package, message);
        match tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("Log queue full, dropping event: {}", event);
            }
            Err(TrySendError::Closed(event)) => {
                debug!("Log worker stopped, discarding event: {}", event);
            }
        }
    }

    pub fn debug(&self, package: Package, message: impl Into<String>) {
        self.report(Level::Debug, package, message);
    }

    pub fn info(&self, package: Package, message: impl Into<String>) {
        self.report(Level::Info, package, message);
    }

    pub fn warn(&self, package: Package, message: impl Into<String>) {
        self.report(Level::Warn, package, message);
    }

    pub fn error(&self, package: Package, message: impl Into<String>) {
        self.report(Level::Error, package, message);
    }
}
