//! # Shortlink Registry
//!
//! A URL shortening service with expiring links, click analytics and a
//! fire-and-forget remote log sink, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link and click entities, log events, storage traits
//! - **Application Layer** ([`application`]) - The link registry and event reporter
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value stores and log sinks
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Generated or custom short codes with per-link validity
//! - Click history (timestamp, source, location) on every redirect
//! - Distinct "not found" and "expired" outcomes
//! - Structured events forwarded to a remote log collector
//!
//! ## Quick Start
//!
//! ```bash
//! export DATA_DIR="./data"                      # Optional, in-memory otherwise
//! export LOG_SINK_URL="http://localhost:9000/logs"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;
pub mod telemetry;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{EventReporter, LinkRegistry, RegistrySummary};
    pub use crate::domain::entities::{
        ClickContext, ClickEvent, LinkRecord, LinkStatus, NewLink, RedirectTarget,
    };
    pub use crate::domain::log_event::{Level, LogEvent, Package, Stack};
    pub use crate::domain::repositories::{KeyValueStore, StoreError};
    pub use crate::error::{AppError, RegistryError, ResolveError, ValidationError};
    pub use crate::infrastructure::persistence::{FileStore, MemoryStore};
    pub use crate::state::AppState;
}
