//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (store reachable)
//!
//! # Admin session
//! GET  /api/admin-login        - {isAdmin}
//! POST /api/admin-login        - {key} -> session cookie
//! POST /api/admin-logout       - clear session cookie
//!
//! # Content
//! GET  /api/site-content       - current document (or default)
//! POST /api/site-content       - replace document (admin)
//!
//! # Donations
//! POST /api/donate-webhook     - announce attempt, return payment link
//! ```

pub mod admin;
pub mod content;
pub mod donate;
pub mod health;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/admin-login", get(admin::status).post(admin::login))
        .route("/admin-logout", post(admin::logout))
        .route(
            "/site-content",
            get(content::get_content).post(content::set_content),
        )
        .route("/donate-webhook", post(donate::donate))
}

/// Create the full router, without state.
///
/// `max_body_bytes` bounds request bodies; profile images may arrive inline
/// as data URLs.
pub fn routes(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(max_body_bytes))
}
