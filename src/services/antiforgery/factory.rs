/// Factory: build the `AntiForgeryGate` from application `Config`.
use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::services::antiforgery::{
    AntiForgeryGate, AuthorizationConfig, CookieHeaderExtractor, DoubleSubmitValidator,
};

pub fn build_antiforgery_gate(config: &Config) -> Result<Arc<AntiForgeryGate>, ConfigError> {
    let settings = &config.antiforgery;
    let policy = AuthorizationConfig::from_settings(settings)?;

    let gate = AntiForgeryGate::new(
        policy,
        Arc::new(CookieHeaderExtractor::new(settings.cookie_name.clone())),
        Arc::new(DoubleSubmitValidator::new(settings.max_token_length)),
    );

    Ok(Arc::new(gate))
}
