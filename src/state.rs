//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::{EventReporter, LinkRegistry};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LinkRegistry>,
    pub reporter: EventReporter,
    /// Prefix for short URLs, without a trailing slash.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        registry: Arc<LinkRegistry>,
        reporter: EventReporter,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            reporter,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
