//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::shorten::{
    BatchSummary, LinkCreated, LinkFailed, ShortenRequest, ShortenResponse, ShortenResultItem,
    UrlItem,
};
use crate::domain::log_event::Package;
use crate::error::AppError;
use crate::state::AppState;

/// Creates short links for one to five URLs.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Batch Processing
///
/// Processes URLs independently. If one fails, others continue processing.
/// Each result includes either success data or error information.
///
/// # Request Body
///
/// ```json
/// {
///   "urls": [
///     {
///       "url": "https://example.com",
///       "validityMinutes": 60,   // optional, default 30
///       "customCode": "abc123"   // optional
///     }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 1, "successful": 1, "failed": 0 },
///   "items": [
///     {
///       "originalUrl": "https://example.com",
///       "shortCode": "abc123",
///       "shortUrl": "http://localhost:3000/abc123",
///       "validityMinutes": 60,
///       "createdAt": "2025-03-01T12:00:00Z",
///       "expiresAt": "2025-03-01T13:00:00Z"
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the batch is empty or larger than five.
/// Individual URL errors are returned in the response items array.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let total = payload.urls.len();
    let mut results = Vec::with_capacity(total);
    let mut successful = 0;
    let mut failed = 0;

    for item in payload.urls {
        let original_url = item.url.clone();

        match process_single_url(&state, item).await {
            Ok(created) => {
                successful += 1;
                results.push(ShortenResultItem::Success(created));
            }
            Err(err) => {
                failed += 1;
                results.push(ShortenResultItem::Error(LinkFailed {
                    original_url,
                    error: err.to_error_info(),
                }));
            }
        }
    }

    Ok(Json(ShortenResponse {
        summary: BatchSummary {
            total,
            successful,
            failed,
        },
        items: results,
    }))
}

async fn process_single_url(state: &AppState, item: UrlItem) -> Result<LinkCreated, AppError> {
    let new_link = item.to_new_link().inspect_err(|e| {
        state
            .reporter
            .warn(Package::Handler, format!("Validation failed: {e}"));
    })?;
    let record = state.registry.create(new_link, Utc::now()).await?;
    let short_url = state.short_url(&record.short_code);

    Ok(LinkCreated::new(record, short_url))
}
