/*
 * Responsibility
 * - The caller's authentication state as reported by the authentication layer
 * - Placed in request extensions by middleware; read-only for everything after it
 *
 * Notes
 * - Credentials are verified elsewhere. This is only the "who/how" tag.
 */
use serde::Serialize;

/// Authentication type tag used for session-cookie callers.
pub const COOKIES_AUTH_TYPE: &str = "Cookies";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestIdentity {
    pub is_authenticated: bool,
    /// Empty for anonymous callers.
    pub authentication_type: String,
}

impl RequestIdentity {
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            authentication_type: String::new(),
        }
    }

    pub fn authenticated(authentication_type: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            authentication_type: authentication_type.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("no identity attached to request (is the identity middleware installed?)")]
    Missing,
}
