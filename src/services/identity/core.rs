use axum::body::Body;
use axum::http::{HeaderMap, Request, header};
use axum_extra::extract::CookieJar;

use super::{COOKIES_AUTH_TYPE, IdentityError, RequestIdentity};

/// Source of the current caller's identity.
///
/// The anti-forgery middleware depends on this trait only, so hosts with a
/// real authentication stack can plug their own lookup in.
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self, req: &Request<Body>) -> Result<RequestIdentity, IdentityError>;
}

/// Reads the `RequestIdentity` that an earlier middleware stored in extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionIdentityProvider;

impl IdentityProvider for ExtensionIdentityProvider {
    fn current_identity(&self, req: &Request<Body>) -> Result<RequestIdentity, IdentityError> {
        req.extensions()
            .get::<RequestIdentity>()
            .cloned()
            .ok_or(IdentityError::Missing)
    }
}

/// Classifies how a request claims to be authenticated.
///
/// - `Authorization: <scheme> <credentials>` => authenticated as `<scheme>`
/// - session cookie with a value => authenticated as `Cookies`
/// - otherwise anonymous
///
/// Credentials are not checked here.
#[derive(Debug, Clone)]
pub struct SchemeIdentityResolver {
    session_cookie_name: String,
}

impl SchemeIdentityResolver {
    pub fn new(session_cookie_name: impl Into<String>) -> Self {
        Self {
            session_cookie_name: session_cookie_name.into(),
        }
    }

    pub fn resolve(&self, headers: &HeaderMap) -> RequestIdentity {
        if let Some(scheme) = authorization_scheme(headers) {
            return RequestIdentity::authenticated(scheme);
        }

        let jar = CookieJar::from_headers(headers);
        let has_session = jar
            .get(&self.session_cookie_name)
            .is_some_and(|c| !c.value().is_empty());

        if has_session {
            RequestIdentity::authenticated(COOKIES_AUTH_TYPE)
        } else {
            RequestIdentity::anonymous()
        }
    }
}

fn authorization_scheme(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, credentials) = value.trim().split_once(' ')?;

    if scheme.is_empty() || credentials.trim().is_empty() {
        return None;
    }
    Some(scheme)
}
