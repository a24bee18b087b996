//! Site content route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::{AppError, INVALID_CONTENT_MESSAGE, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Response for a successful save.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Current page content, or the default record if none was saved.
///
/// GET /api/site-content
pub async fn get_content(State(state): State<AppState>) -> Result<Json<JsonValue>> {
    let document = state
        .content()
        .get()
        .await
        .map_err(AppError::FetchContent)?;

    Ok(Json(document))
}

/// Replace the page content. Requires an admin session.
///
/// POST /api/site-content
pub async fn set_content(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    payload: std::result::Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<SaveResponse>> {
    let Json(document) =
        payload.map_err(|e| AppError::from_json_rejection(&e, INVALID_CONTENT_MESSAGE))?;

    state.content().set(&document).await?;

    Ok(Json(SaveResponse {
        success: true,
        message: "Site content updated successfully.",
    }))
}
