use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::routes::AppState;

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /ready - Readiness probe
///
/// Not ready while the mail configuration is incomplete, since every
/// submission would be refused.
pub async fn ready(State(app_state): State<AppState>) -> impl IntoResponse {
    match app_state.handler.configuration_error() {
        None => (StatusCode::OK, Json(json!({"status": "ready"}))),
        Some(e) => {
            tracing::warn!(error = %e, "Readiness check failed: mail not configured");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "reason": "mail_not_configured"
                })),
            )
        }
    }
}
