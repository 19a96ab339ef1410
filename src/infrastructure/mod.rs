//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`persistence`] - Key-value store implementations (memory, file)
//! - [`log_sink`] - Remote log sink client and delivery worker

pub mod log_sink;
pub mod persistence;
