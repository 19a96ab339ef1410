//! Application services orchestrating domain operations.
//!
//! - [`LinkRegistry`] - link creation, resolution and analytics
//! - [`EventReporter`] - fire-and-forget event reporting to the log sink

pub mod event_reporter;
pub mod registry_service;

pub use event_reporter::EventReporter;
pub use registry_service::{
    DEFAULT_VALIDITY_MINUTES, LinkRegistry, RegistrySummary, summarize_records,
};
