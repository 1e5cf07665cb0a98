//! Anti-forgery (CSRF) gate for the routes it is applied to.
//!
//! Flow per request:
//! - identity from `IdentityProvider`, only looked up when an auth-type list is
//!   configured (missing => 500, the auth layer is not wired)
//! - policy decides Skip / Validate
//! - Validate: cookie token + `X-RequestVerificationToken` go to the validator
//! - rejection => 403 `ANTIFORGERY_VALIDATION_FAILED`

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::antiforgery::AuthorizationResult;
use crate::services::identity::RequestIdentity;
use crate::state::AppState;

/// Gate every route of `router` behind the anti-forgery check.
///
/// Uses `route_layer`, so unmatched paths still 404 instead of 403.
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::antiforgery::apply(v1, state.clone());
/// let v1 = middleware::auth::identity::apply(v1, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, antiforgery_middleware))
}

async fn antiforgery_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let gate = &state.antiforgery;

    // Without lists the decision ignores identity, so no identity layer is needed
    let identity = if gate.config().filters_by_auth_type() {
        state.identity.current_identity(&req).map_err(|err| {
            tracing::error!(error = %err, "anti-forgery gate has no identity to work with");
            AppError::from(err)
        })?
    } else {
        RequestIdentity::anonymous()
    };

    let result = gate
        .authorize(req.headers(), &identity)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "anti-forgery gate failed");
            AppError::from(err)
        })?;

    match result {
        AuthorizationResult::Allowed => Ok(next.run(req).await),
        AuthorizationResult::Denied(reason) => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                auth_type = %identity.authentication_type,
                reason = %reason,
                "anti-forgery validation failed"
            );
            Err(AppError::from(reason))
        }
    }
}
