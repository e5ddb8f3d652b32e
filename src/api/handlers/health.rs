//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Link store**: Redis PING (`disabled` when no store is configured)
/// 2. **Access log queue**: Checks if channel is open and reports free slots
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "link_store": { "status": "ok", "message": "Store reachable" },
///     "access_log": { "status": "ok", "message": "Capacity: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let queue_check = check_access_log(&state);

    let all_healthy = store_check.is_healthy() && queue_check.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            link_store: store_check,
            access_log: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks link store connectivity.
async fn check_store(state: &AppState) -> CheckStatus {
    match state.resolver.store() {
        None => CheckStatus::disabled("No key-value backend configured"),
        Some(store) if store.health_check().await => CheckStatus::ok("Store reachable"),
        Some(_) => CheckStatus::error("Store unreachable"),
    }
}

/// Checks if the access log queue is operational.
fn check_access_log(state: &AppState) -> CheckStatus {
    match &state.access_log {
        None => CheckStatus::disabled("Access logging disabled"),
        Some(queue) if queue.is_closed() => CheckStatus::error("Access log queue is closed"),
        Some(queue) => CheckStatus::ok(format!("Capacity: {}", queue.capacity())),
    }
}
