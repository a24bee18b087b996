//! SupportMe site library.
//!
//! A donation landing page backend: one editable content document, a shared
//! secret admin login with a signed session cookie, and a best-effort Discord
//! announcement for each donation attempt.
//!
//! Exposed as a library so the router can be driven in-process by tests and
//! the CLI can reuse the store and content service.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod discord;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use std::time::Duration;

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are left to the binary, which owns the Sentry client.
pub fn app(state: AppState) -> Router {
    let max_body_bytes = state.config().max_body_bytes;

    routes::routes(max_body_bytes)
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
