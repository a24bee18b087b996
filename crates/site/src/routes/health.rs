//! Health check handlers.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the content store is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.content().store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
