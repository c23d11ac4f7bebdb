//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Session store reachable
/// - **503 Service Unavailable**: Session store degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "sessions": { "status": "ok", "message": "Session store reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let sessions_check = check_sessions(&state).await;

    let all_healthy = sessions_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            sessions: sessions_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_sessions(state: &AppState) -> CheckStatus {
    if state.sessions.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Session store reachable".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Session store unreachable".to_string()),
        }
    }
}
