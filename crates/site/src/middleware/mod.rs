//! HTTP middleware stack for the site.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers
//!
//! Admin authentication is per handler via the extractors in [`admin`].

pub mod admin;
pub mod request_id;
pub mod security_headers;

pub use admin::{AdminStatus, RequireAdmin, SESSION_COOKIE, removal_cookie, session_cookie};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
