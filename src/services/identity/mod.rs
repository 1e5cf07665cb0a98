/*!
 * Request identity
 *
 * Responsibility:
 * - Type of the caller's authentication state (types)
 * - How the host looks it up / classifies it (core)
 */

mod core;
mod types;

pub use core::{ExtensionIdentityProvider, IdentityProvider, SchemeIdentityResolver};
pub use types::{COOKIES_AUTH_TYPE, IdentityError, RequestIdentity};
