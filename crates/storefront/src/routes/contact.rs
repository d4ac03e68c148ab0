//! Form submission route handlers.
//!
//! Both forms are validated, rendered to HTML and forwarded to the configured
//! recipient in a single SMTP delivery attempt. Nothing is stored.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use loopcart_core::{AccessRequest, AccessRequestForm, ConciergeRequest, ConciergeRequestForm};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Location, Result};
use crate::services::EmailService;
use crate::state::AppState;

/// Response for a successful form submission.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub ok: bool,
    pub message: &'static str,
}

impl SubmissionResponse {
    const fn sent(message: &'static str) -> Json<Self> {
        Json(Self { ok: true, message })
    }
}

/// Submit an exclusive-collection access request.
///
/// POST /request-access
#[instrument(skip_all)]
pub async fn request_access(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AccessRequestForm>, JsonRejection>,
) -> Result<Json<SubmissionResponse>> {
    let Json(form) = payload?;
    let request =
        AccessRequest::try_from(form).map_err(|e| AppError::validation(Location::Body, e))?;

    let email = mailer(&state)?;
    email.send_access_request(&request).await?;

    tracing::info!(email = %request.email, "Access request forwarded");
    Ok(SubmissionResponse::sent("Request sent successfully!"))
}

/// Submit a personal-concierge request.
///
/// POST /personal-concierge
#[instrument(skip_all)]
pub async fn personal_concierge(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ConciergeRequestForm>, JsonRejection>,
) -> Result<Json<SubmissionResponse>> {
    let Json(form) = payload?;
    let request =
        ConciergeRequest::try_from(form).map_err(|e| AppError::validation(Location::Body, e))?;

    let email = mailer(&state)?;
    email.send_concierge_request(&request).await?;

    tracing::info!(email = %request.email, "Concierge request forwarded");
    Ok(SubmissionResponse::sent("Concierge request sent successfully!"))
}

fn mailer(state: &AppState) -> Result<&EmailService> {
    state.email().ok_or(AppError::EmailNotConfigured)
}
