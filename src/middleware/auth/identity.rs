//! Identity tagging → `RequestIdentity` into extensions
//!
//! Stands in for the host's authentication layer: it only records *how* the
//! caller claims to be authenticated (Authorization scheme or session cookie).
//! Checking those credentials is not done here.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::state::AppState;

/// Attach a `RequestIdentity` to every request handled by `router`.
///
/// Must sit outside (be applied after) `middleware::antiforgery::apply`, so the
/// gate can see the identity.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, identity_middleware))
}

async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let identity = state.identity_resolver.resolve(req.headers());

    tracing::debug!(
        authenticated = identity.is_authenticated,
        auth_type = %identity.authentication_type,
        "request identity resolved"
    );

    // middleware → gate / extractor
    req.extensions_mut().insert(identity);

    next.run(req).await
}
