//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Link records and click events
//! - [`repositories`] - Key-value storage contract and the link collection codec
//! - [`log_event`] - Structured event model consumed by the remote log sink
//!
//! The domain layer has no dependency on HTTP or concrete storage backends.
//! Business operations live in [`crate::application::services`].

pub mod entities;
pub mod log_event;
pub mod repositories;
