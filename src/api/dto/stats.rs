//! DTOs for link analytics endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::RegistrySummary;
use crate::domain::entities::{LinkRecord, LinkStatus};

/// A stored link with derived analytics fields.
///
/// The record itself (including its click history) is flattened into the
/// object, so clients see the persisted fields plus `shortUrl`, `status` and
/// `clickCount`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatsItem {
    #[serde(flatten)]
    pub link: LinkRecord,
    pub short_url: String,
    pub status: LinkStatus,
    pub click_count: usize,
}

impl LinkStatsItem {
    pub fn new(link: LinkRecord, short_url: String, now: DateTime<Utc>) -> Self {
        Self {
            status: link.status_at(now),
            click_count: link.click_count(),
            short_url,
            link,
        }
    }
}

/// Registry summary plus every link, in creation order.
#[derive(Debug, Serialize)]
pub struct StatsListResponse {
    pub summary: RegistrySummary,
    pub items: Vec<LinkStatsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ClickContext, ClickEvent};
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_item_flattens_record_fields() {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let link = LinkRecord {
            id: "1740830400000wxyz".to_string(),
            original_url: "https://example.com".to_string(),
            short_code: "abc123".to_string(),
            created_at,
            validity_minutes: 10,
            expires_at: created_at + Duration::minutes(10),
            clicks: vec![ClickEvent::from_context(
                created_at + Duration::minutes(1),
                &ClickContext::default(),
            )],
        };

        let item = LinkStatsItem::new(
            link,
            "http://localhost:3000/abc123".to_string(),
            created_at + Duration::minutes(11),
        );
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["shortCode"], "abc123");
        assert_eq!(value["originalUrl"], "https://example.com");
        assert_eq!(value["shortUrl"], "http://localhost:3000/abc123");
        assert_eq!(value["status"], "expired");
        assert_eq!(value["clickCount"], 1);
        assert_eq!(value["clicks"][0]["source"], "Direct");
    }
}
