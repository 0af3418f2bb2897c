use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// Unix time in milliseconds
    pub ts: i64,
}

/// Liveness probe, no auth
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: chrono::Utc::now().timestamp_millis(),
    })
}
