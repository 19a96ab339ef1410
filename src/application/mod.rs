//! Application layer services implementing business logic.
//!
//! Services consume the storage and sink abstractions and expose plain async
//! functions to the HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::registry_service::LinkRegistry`] - Short link creation, resolution and analytics
//! - [`services::event_reporter::EventReporter`] - Non-blocking event reporting

pub mod services;
