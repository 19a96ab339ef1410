//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;

use crate::domain::entities::ClickContext;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// A successful resolution appends a click whose source is the `Referer`
/// header (or `Direct` when absent) before the redirect is sent. Location is
/// not derived from the request and is recorded as `Unknown Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let referer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());
    let context = ClickContext::new(referer, None);

    let target = state.registry.resolve(&code, Utc::now(), &context).await?;

    Ok(Redirect::temporary(&target.url))
}
