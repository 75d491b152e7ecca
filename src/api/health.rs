//! Health check handler

use axum::response::Json;
use serde::Serialize;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always true while the process is serving requests
    pub ok: bool,
}

/// GET /health - Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
