//! The anti-forgery gate: policy decision + token check.
//!
//! Framework-free apart from `HeaderMap`. The middleware wraps this and turns
//! the result into a response.

use std::sync::Arc;

use axum::http::HeaderMap;

use super::policy::{self, AuthorizationConfig, ValidationOutcome};
use super::tokens::TokenExtractor;
use super::validator::{TokenValidator, ValidationError, ValidatorError};
use crate::services::identity::RequestIdentity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResult {
    Allowed,
    Denied(ValidationError),
}

/// Failures that are not a verdict on the token pair.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("token validator unavailable: {0}")]
    Backend(String),
}

pub struct AntiForgeryGate {
    config: AuthorizationConfig,
    extractor: Arc<dyn TokenExtractor>,
    validator: Arc<dyn TokenValidator>,
}

impl std::fmt::Debug for AntiForgeryGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AntiForgeryGate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AntiForgeryGate {
    pub fn new(
        config: AuthorizationConfig,
        extractor: Arc<dyn TokenExtractor>,
        validator: Arc<dyn TokenValidator>,
    ) -> Self {
        Self {
            config,
            extractor,
            validator,
        }
    }

    pub fn config(&self) -> &AuthorizationConfig {
        &self.config
    }

    pub fn decide(&self, identity: &RequestIdentity) -> ValidationOutcome {
        policy::decide(&self.config, identity)
    }

    /// Skipped requests never touch the extractor or validator.
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        identity: &RequestIdentity,
    ) -> Result<AuthorizationResult, GateError> {
        if !policy::should_validate(&self.config, identity) {
            tracing::debug!(
                auth_type = %identity.authentication_type,
                "anti-forgery validation skipped by policy"
            );
            return Ok(AuthorizationResult::Allowed);
        }

        let pair = self.extractor.extract(headers);

        match self
            .validator
            .validate(&pair.cookie_token, &pair.header_token)
            .await
        {
            Ok(()) => {
                tracing::debug!(
                    auth_type = %identity.authentication_type,
                    "anti-forgery token pair accepted"
                );
                Ok(AuthorizationResult::Allowed)
            }
            Err(ValidatorError::Rejected(reason)) => Ok(AuthorizationResult::Denied(reason)),
            Err(ValidatorError::Backend(msg)) => Err(GateError::Backend(msg)),
        }
    }
}
