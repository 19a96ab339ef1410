//! Handler for detailed link statistics.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde_json::json;

use crate::api::dto::stats::LinkStatsItem;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves a single link with its full click history.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// Expired links are still returned (with `status: "expired"`); reading
/// statistics never records a click.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkStatsItem>, AppError> {
    let link = state
        .registry
        .find(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

    let short_url = state.short_url(&link.short_code);

    Ok(Json(LinkStatsItem::new(link, short_url, Utc::now())))
}
