//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Number of configured locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<usize>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        locations: None,
    })
}

/// Readiness check endpoint.
///
/// Unavailable until at least one location is configured, since no
/// request could be routed without one.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let locations = state.services.locations.len();
    let (code, status) = if state.services.locations.is_empty() {
        (StatusCode::SERVICE_UNAVAILABLE, "no locations configured")
    } else {
        (StatusCode::OK, "ready")
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            locations: Some(locations),
        }),
    )
}
