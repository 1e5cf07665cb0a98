/*
 * Responsibility
 * - request/response DTOs for /submissions
 */
use serde::{Deserialize, Serialize};

use crate::services::identity::RequestIdentity;

#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub message: String,
}

impl CreateSubmissionRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.message.trim().is_empty() {
            return Err("message is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub accepted: bool,
    pub message: String,
    pub identity: RequestIdentity,
}

/// What the gate did for this caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Validated,
    Skipped,
}

#[derive(Debug, Serialize)]
pub struct GateStatusResponse {
    pub identity: RequestIdentity,
    pub antiforgery: GateDecision,
}
