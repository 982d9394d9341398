//! Health check handler.

use axum::{response::IntoResponse, Json};
use chrono::Utc;

/// Liveness probe - process is running.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service is alive", body = serde_json::Value))
)]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
