//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Loads the link collection
/// 2. **Log Queue**: Checks the event queue is open and reports free capacity
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "4 links under key 'urlData'" },
///     "log_queue": { "status": "ok", "message": "Capacity: 1000 (Backend stack)" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let queue_check = check_log_queue(&state);

    let all_healthy = store_check.is_ok() && queue_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            log_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    match state.registry.list_all().await {
        Ok(records) => CheckStatus::ok(format!(
            "{} links under key '{}'",
            records.len(),
            state.registry.storage_key()
        )),
        Err(e) => CheckStatus::error(format!("Store error: {}", e)),
    }
}

fn check_log_queue(state: &AppState) -> CheckStatus {
    match state.reporter.capacity() {
        Some(capacity) if state.reporter.is_active() => CheckStatus::ok(format!(
            "Capacity: {} ({:?} stack)",
            capacity,
            state.reporter.stack()
        )),
        _ => CheckStatus::error("Log queue is closed"),
    }
}
