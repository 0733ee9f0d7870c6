//! Service info and health handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{HealthResponse, ServiceInfoResponse};
use crate::state::AppState;

/// GET /api/
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: "TokenGate authentication gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: state.clock.now(),
    })
}
