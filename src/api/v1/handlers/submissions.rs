/*
 * Responsibility
 * - GET/POST /submissions (state-changing sample resource behind the gate)
 * - Reaching a handler means the gate already allowed the request
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::api::v1::dto::submissions::{
    CreateSubmissionRequest, GateDecision, GateStatusResponse, SubmissionResponse,
};
use crate::api::v1::extractors::CurrentIdentity;
use crate::error::AppError;
use crate::services::antiforgery::ValidationOutcome;
use crate::state::AppState;

pub async fn gate_status(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse, AppError> {
    let antiforgery = match state.antiforgery.decide(&identity) {
        ValidationOutcome::Validate => GateDecision::Validated,
        ValidationOutcome::Skip => GateDecision::Skipped,
    };

    Ok(Json(GateStatusResponse {
        identity,
        antiforgery,
    }))
}

pub async fn create_submission(
    CurrentIdentity(identity): CurrentIdentity,
    Json(req): Json<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    tracing::info!(auth_type = %identity.authentication_type, "submission accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmissionResponse {
            accepted: true,
            message: req.message,
            identity,
        }),
    ))
}
