use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::identity::{IdentityError, RequestIdentity};
use crate::state::AppState;

/// Handler-side access to the caller's identity.
/// Assumes the identity middleware already inserted it into extensions;
/// without it the wiring is broken, so this is a 500 rather than a 401.
pub struct CurrentIdentity(pub RequestIdentity);

impl FromRequestParts<AppState> for CurrentIdentity
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(|| AppError::from(IdentityError::Missing))
    }
}
