//! Admin session cookie and extractors.
//!
//! The signed session token travels in the `isAdmin` cookie. Handlers never
//! read the cookie directly; they take [`AdminStatus`] or [`RequireAdmin`].

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "isAdmin";

/// Whether the request carries a valid admin session.
///
/// Never rejects.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(AdminStatus(is_admin): AdminStatus) -> impl IntoResponse {
///     Json(json!({ "isAdmin": is_admin }))
/// }
/// ```
pub struct AdminStatus(pub bool);

impl FromRequestParts<AppState> for AdminStatus {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(has_valid_session(parts, state)))
    }
}

/// Extractor that requires a valid admin session.
///
/// Rejects with `403 {"error": "Unauthorized: Admin access required."}`.
/// Runs before the body is read, so unauthorized writes are never parsed.
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if has_valid_session(parts, state) {
            Ok(Self)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

fn has_valid_session(parts: &Parts, state: &AppState) -> bool {
    let jar = CookieJar::from_headers(&parts.headers);
    state
        .sessions()
        .check_status(jar.get(SESSION_COOKIE).map(Cookie::value))
}

/// Cookie carrying a freshly issued session token.
#[must_use]
pub fn session_cookie(token: String, max_age: chrono::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .build()
}

/// Cookie that clears the session on the client.
///
/// Always emitted, whether or not the request carried a session.
#[must_use]
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    cookie.make_removal();
    cookie
}
