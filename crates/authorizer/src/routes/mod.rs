//! HTTP routes for the authorizer.
//!
//! Defines the Axum router and application state.

use crate::handlers;
use crate::services::DecisionService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
pub struct AppState {
    /// Decision builder wired over the authentication use case.
    pub decision: DecisionService,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `POST /v1/authorize` - authorization decision endpoint
/// - `GET /v1/health` - health check endpoint
/// - `TraceLayer` for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/authorize", post(handlers::authorize))
        .route("/v1/health", get(handlers::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
