//! Handler for the registry-wide statistics listing.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::stats::{LinkStatsItem, StatsListResponse};
use crate::application::services::summarize_records;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every link with its status and click count.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// {
///   "summary": { "totalLinks": 2, "activeLinks": 1, "expiredLinks": 1, "totalClicks": 3 },
///   "items": [ { "shortCode": "abc123", "status": "active", "clickCount": 3, ... } ]
/// }
/// ```
///
/// Items are in creation order. The summary and the items come from the same
/// snapshot of the collection.
pub async fn stats_list_handler(
    State(state): State<AppState>,
) -> Result<Json<StatsListResponse>, AppError> {
    let now = Utc::now();
    let records = state.registry.list_all().await?;
    let summary = summarize_records(&records, now);

    let items = records
        .into_iter()
        .map(|link| {
            let short_url = state.short_url(&link.short_code);
            LinkStatsItem::new(link, short_url, now)
        })
        .collect();

    Ok(Json(StatsListResponse { summary, items }))
}
