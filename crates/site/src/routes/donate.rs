//! Donation route handler.
//!
//! A donation is a redirect to an external payment link. The server records
//! nothing; it only announces the attempt and hands back the link.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use supportme_core::{CashAppHandle, Donation};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response for an accepted donation attempt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonateResponse {
    pub success: bool,
    pub payment_url: String,
}

/// Announce a donation attempt and return its payment link.
///
/// Responds 202 whether or not the notification is delivered.
///
/// POST /api/donate-webhook
pub async fn donate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Donation>, JsonRejection>,
) -> Result<(StatusCode, Json<DonateResponse>)> {
    let Json(donation) =
        payload.map_err(|e| AppError::from_json_rejection(&e, "Invalid donation request."))?;
    donation.validate()?;

    let handle = resolve_handle(&state, &donation).await?;
    let payment_url = donation.payment_url(&handle);

    info!(amount = %donation.amount_display(), handle = %handle, "Donation attempt");

    match state.notifier() {
        Some(notifier) => notifier.notify(donation, handle),
        None => debug!("No Discord webhook configured; skipping notification"),
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(DonateResponse {
            success: true,
            payment_url,
        }),
    ))
}

/// Handle from the request, else the one on the page.
///
/// A malformed handle in the request is the caller's error. A malformed
/// stored handle is a server error; it never falls back to the default,
/// which would route the payment to someone else.
async fn resolve_handle(state: &AppState, donation: &Donation) -> Result<CashAppHandle> {
    if let Some(requested) = donation
        .cash_app_handle
        .as_deref()
        .filter(|h| !h.trim().is_empty())
    {
        return CashAppHandle::parse(requested).map_err(|e| AppError::InvalidInput(e.to_string()));
    }

    let stored = state.content().cash_app_handle().await;
    CashAppHandle::parse(&stored).map_err(|e| {
        AppError::Internal(format!("stored payment handle {stored:?} is unusable: {e}"))
    })
}
