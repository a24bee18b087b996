//! Admin session route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::middleware::{AdminStatus, removal_cookie, session_cookie};
use crate::services::AuthError;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// The shared admin secret. A missing key counts as a wrong key.
    #[serde(default)]
    pub key: String,
}

/// Response for the status check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_admin: bool,
}

/// Response for login and logout.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Report whether the caller holds a valid admin session.
///
/// GET /api/admin-login
pub async fn status(AdminStatus(is_admin): AdminStatus) -> Json<StatusResponse> {
    Json(StatusResponse { is_admin })
}

/// Exchange the admin secret for a session cookie.
///
/// POST /api/admin-login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SuccessResponse>)> {
    let Json(request) =
        payload.map_err(|e| AppError::from_json_rejection(&e, "Invalid request body."))?;

    let session = state.sessions().login(&request.key).inspect_err(|e| {
        if matches!(e, AuthError::InvalidCredential) {
            warn!("Rejected admin login attempt");
        }
    })?;

    info!(expires_at = %session.token.expires_at(), "Admin logged in");

    let cookie = session_cookie(
        session.encoded,
        state.sessions().ttl(),
        state.config().secure_cookies(),
    );

    Ok((jar.add(cookie), Json(SuccessResponse { success: true })))
}

/// Clear the session cookie.
///
/// POST /api/admin-logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let jar = jar.add(removal_cookie(state.config().secure_cookies()));
    (jar, Json(SuccessResponse { success: true }))
}
