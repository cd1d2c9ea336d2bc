//! Health check handler.

use axum::Json;
use serde::Serialize;

/// Health check response body.
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Liveness probe. The authorizer holds no connections worth checking;
/// responding at all is the signal.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
