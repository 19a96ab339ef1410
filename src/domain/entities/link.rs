//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::click::ClickEvent;

/// A shortened URL with its validity window and click history.
///
/// Field names serialize in camelCase so the persisted collection keeps the
/// `originalUrl` / `shortCode` / `expiresAt` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub id: String,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub validity_minutes: u32,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub clicks: Vec<ClickEvent>,
}

/// Redirect eligibility of a link at a given instant.
///
/// `Active` moves to `Expired` exactly once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Active,
    Expired,
}

impl LinkRecord {
    /// Returns true once `now` is strictly after `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> LinkStatus {
        if self.is_expired_at(now) {
            LinkStatus::Expired
        } else {
            LinkStatus::Active
        }
    }

    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    /// Appends a click to the history.
    pub(crate) fn record_click(&mut self, click: ClickEvent) {
        self.clicks.push(click);
    }
}

/// Input data for creating a new link.
///
/// Blank `custom_short_code` values are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub original_url: String,
    pub validity_minutes: Option<i64>,
    pub custom_short_code: Option<String>,
}

impl NewLink {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            ..Self::default()
        }
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_short_code = Some(code.into());
        self
    }
}

/// Successful resolution of a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub url: String,
    pub click_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn test_record() -> LinkRecord {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        LinkRecord {
            id: "1740830400000abcd".to_string(),
            original_url: "https://example.com".to_string(),
            short_code: "abc123".to_string(),
            created_at,
            validity_minutes: 30,
            expires_at: created_at + Duration::minutes(30),
            clicks: Vec::new(),
        }
    }

    #[test]
    fn test_active_until_expiry_instant() {
        let record = test_record();

        assert_eq!(record.status_at(record.created_at), LinkStatus::Active);
        assert_eq!(record.status_at(record.expires_at), LinkStatus::Active);
        assert!(!record.is_expired_at(record.expires_at));
    }

    #[test]
    fn test_expired_after_expiry_instant() {
        let record = test_record();
        let later = record.expires_at + Duration::milliseconds(1);

        assert!(record.is_expired_at(later));
        assert_eq!(record.status_at(later), LinkStatus::Expired);
    }

    #[test]
    fn test_record_click_appends_in_order() {
        let mut record = test_record();
        let first = record.created_at + Duration::minutes(1);
        let second = record.created_at + Duration::minutes(2);

        for ts in [first, second] {
            record.record_click(ClickEvent {
                timestamp: ts,
                source: "Direct".to_string(),
                location: "Unknown Location".to_string(),
            });
        }

        assert_eq!(record.click_count(), 2);
        assert_eq!(record.clicks[0].timestamp, first);
        assert_eq!(record.clicks[1].timestamp, second);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let value = serde_json::to_value(test_record()).unwrap();

        assert_eq!(value["originalUrl"], "https://example.com");
        assert_eq!(value["shortCode"], "abc123");
        assert_eq!(value["validityMinutes"], 30);
        assert_eq!(value["createdAt"], "2025-03-01T12:00:00Z");
        assert_eq!(value["expiresAt"], "2025-03-01T12:30:00Z");
        assert!(value["clicks"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_deserializes_without_clicks_field() {
        let raw = r#"{
            "id": "x",
            "originalUrl": "https://example.com",
            "shortCode": "abc",
            "createdAt": "2025-03-01T12:00:00.000Z",
            "validityMinutes": 5,
            "expiresAt": "2025-03-01T12:05:00.000Z"
        }"#;

        let record: LinkRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record.validity_minutes, 5);
        assert!(record.clicks.is_empty());
    }

    #[test]
    fn test_new_link_builder() {
        let new_link = NewLink::new("https://rust-lang.org")
            .with_validity(10)
            .with_custom_code("rust");

        assert_eq!(new_link.original_url, "https://rust-lang.org");
        assert_eq!(new_link.validity_minutes, Some(10));
        assert_eq!(new_link.custom_short_code.as_deref(), Some("rust"));
    }
}
