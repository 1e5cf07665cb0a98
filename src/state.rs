/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - anti-forgery gate, identity lookup, identity classification
 * - Cheap to Clone (everything inside is Arc)
 */
use std::sync::Arc;

use crate::services::antiforgery::AntiForgeryGate;
use crate::services::identity::{IdentityProvider, SchemeIdentityResolver};

#[derive(Clone)]
pub struct AppState {
    pub antiforgery: Arc<AntiForgeryGate>,
    pub identity: Arc<dyn IdentityProvider>,
    pub identity_resolver: Arc<SchemeIdentityResolver>,
}

impl AppState {
    pub fn new(
        antiforgery: Arc<AntiForgeryGate>,
        identity: Arc<dyn IdentityProvider>,
        identity_resolver: Arc<SchemeIdentityResolver>,
    ) -> Self {
        Self {
            antiforgery,
            identity,
            identity_resolver,
        }
    }
}
