//! Click entity representing a single successful redirect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source recorded when a redirect carries no referrer.
pub const DIRECT_SOURCE: &str = "Direct";

/// Location recorded when no geolocation information is available.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A click recorded when a short code resolves to its original URL.
///
/// Click events are appended to [`crate::domain::entities::LinkRecord::clicks`]
/// and never reordered or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub location: String,
}

impl ClickEvent {
    /// Builds a click event from the caller context, filling in sentinels for
    /// missing values.
    pub fn from_context(timestamp: DateTime<Utc>, context: &ClickContext) -> Self {
        Self {
            timestamp,
            source: context
                .source
                .clone()
                .unwrap_or_else(|| DIRECT_SOURCE.to_string()),
            location: context
                .location
                .clone()
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        }
    }
}

/// Caller-supplied metadata about a redirect.
///
/// Empty strings are treated the same as missing values.
#[derive(Debug, Clone, Default)]
pub struct ClickContext {
    pub source: Option<String>,
    pub location: Option<String>,
}

impl ClickContext {
    /// Creates a context from optional referrer and location labels.
    pub fn new(source: Option<&str>, location: Option<&str>) -> Self {
        Self {
            source: non_blank(source),
            location: non_blank(location),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
