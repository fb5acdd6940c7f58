//! HTTP handlers for catalog action pages

pub mod health;
pub mod schedule;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router<S>(state: AppState, sessions: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/schedule", get(schedule::show).post(schedule::submit))
        .with_state(state)
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
}
