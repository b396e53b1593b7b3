use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::app_state::AppState;
use crate::dto::HealthResponse;

/// Liveness probe, always 200
///
/// @route GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse,
            example = json!({"status": "healthy", "service": "calcsrv"}))
    ),
    tag = "calcsrv"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service.name.clone(),
    })
}
