//! Authentication-type based bypass policy.
//!
//! This module is core-only: no axum, no headers. It answers one question,
//! "does this caller have to present an anti-forgery token pair?", from the
//! configured include/exclude lists and the caller's identity.

use crate::config::{AntiForgerySettings, ConfigError};
use crate::services::identity::RequestIdentity;

/// Comma-separated list of authentication types, trimmed element-wise.
///
/// Blank elements are kept as `""`, so `"Bearer, "` also lists the empty type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTypeList(Vec<String>);

impl AuthTypeList {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .map(str::to_string)
                .collect(),
        )
    }

    /// Exact, case-sensitive match.
    pub fn contains(&self, auth_type: &str) -> bool {
        self.0.iter().any(|t| t == auth_type)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Skip,
    Validate,
}

/// Immutable policy knobs for the anti-forgery gate.
///
/// Include and exclude are mutually exclusive; `new` refuses to build a
/// config that sets both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationConfig {
    exclude_auth_types: Option<AuthTypeList>,
    include_auth_types: Option<AuthTypeList>,
    require_authentication: bool,
}

impl AuthorizationConfig {
    pub fn new(
        exclude_auth_types: Option<&str>,
        include_auth_types: Option<&str>,
        require_authentication: bool,
    ) -> Result<Self, ConfigError> {
        if exclude_auth_types.is_some() && include_auth_types.is_some() {
            return Err(ConfigError::Conflict(
                "exclude_auth_types",
                "include_auth_types",
            ));
        }

        Ok(Self {
            exclude_auth_types: exclude_auth_types.map(AuthTypeList::parse),
            include_auth_types: include_auth_types.map(AuthTypeList::parse),
            require_authentication,
        })
    }

    pub fn from_settings(settings: &AntiForgerySettings) -> Result<Self, ConfigError> {
        Self::new(
            settings.exclude_auth_types.as_deref(),
            settings.include_auth_types.as_deref(),
            settings.require_authentication,
        )
    }

    pub fn exclude_auth_types(&self) -> Option<&AuthTypeList> {
        self.exclude_auth_types.as_ref()
    }

    pub fn include_auth_types(&self) -> Option<&AuthTypeList> {
        self.include_auth_types.as_ref()
    }

    pub fn require_authentication(&self) -> bool {
        self.require_authentication
    }

    /// Without either list every request is validated and identity is irrelevant.
    pub fn filters_by_auth_type(&self) -> bool {
        self.exclude_auth_types.is_some() || self.include_auth_types.is_some()
    }
}

/// Decision table, first match wins:
/// 1. no lists configured: validate
/// 2. authentication required but caller is anonymous: skip (rejected elsewhere)
/// 3. anonymous caller: validate
/// 4. include list: validate iff the caller's type is listed
/// 5. exclude list: validate iff the caller's type is not listed
pub fn decide(config: &AuthorizationConfig, identity: &RequestIdentity) -> ValidationOutcome {
    let validate = match (&config.include_auth_types, &config.exclude_auth_types) {
        (None, None) => true,
        _ if config.require_authentication && !identity.is_authenticated => false,
        _ if !identity.is_authenticated => true,
        (Some(include), _) => include.contains(&identity.authentication_type),
        (None, Some(exclude)) => !exclude.contains(&identity.authentication_type),
    };

    if validate {
        ValidationOutcome::Validate
    } else {
        ValidationOutcome::Skip
    }
}

pub fn should_validate(config: &AuthorizationConfig, identity: &RequestIdentity) -> bool {
    decide(config, identity) == ValidationOutcome::Validate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> RequestIdentity {
        RequestIdentity::anonymous()
    }

    fn authed(auth_type: &str) -> RequestIdentity {
        RequestIdentity::authenticated(auth_type)
    }

    fn exclude(list: &str) -> AuthorizationConfig {
        AuthorizationConfig::new(Some(list), None, false).unwrap()
    }

    fn include(list: &str) -> AuthorizationConfig {
        AuthorizationConfig::new(None, Some(list), false).unwrap()
    }

    #[test]
    fn parse_trims_and_keeps_blank_elements() {
        let list = AuthTypeList::parse(" Bearer , ApiKey ,, ");
        assert_eq!(list.as_slice(), ["Bearer", "ApiKey", "", ""]);
    }

    #[test]
    fn membership_is_case_sensitive() {
        let list = AuthTypeList::parse("Bearer");
        assert!(list.contains("Bearer"));
        assert!(!list.contains("bearer"));
        assert!(!list.contains(" Bearer"));
    }

    #[test]
    fn no_lists_always_validates() {
        for require in [false, true] {
            let config = AuthorizationConfig::new(None, None, require).unwrap();
            assert!(should_validate(&config, &anonymous()));
            assert!(should_validate(&config, &authed("Bearer")));
            assert!(should_validate(&config, &authed("")));
        }
    }

    #[test]
    fn anonymous_skips_when_authentication_required() {
        let configs = [
            AuthorizationConfig::new(Some("Bearer"), None, true).unwrap(),
            AuthorizationConfig::new(None, Some("Cookies"), true).unwrap(),
        ];
        for config in &configs {
            assert_eq!(decide(config, &anonymous()), ValidationOutcome::Skip);
        }
    }

    #[test]
    fn anonymous_validates_when_authentication_optional() {
        assert!(should_validate(&exclude("Bearer"), &anonymous()));
        assert!(should_validate(&include("Cookies"), &anonymous()));
        // Anonymous callers are validated even if their (empty) type would be excluded
        assert!(should_validate(&exclude(""), &anonymous()));
    }

    #[test]
    fn include_list_validates_only_listed_types() {
        let config = include("Bearer, ApiKey");
        assert!(should_validate(&config, &authed("Bearer")));
        assert!(should_validate(&config, &authed("ApiKey")));
        assert!(!should_validate(&config, &authed("Basic")));
    }

    #[test]
    fn exclude_list_skips_listed_types() {
        let config = exclude("Bearer");
        assert!(!should_validate(&config, &authed("Bearer")));
        assert!(should_validate(&config, &authed("Basic")));
    }

    #[test]
    fn exclude_list_elements_are_trimmed() {
        let config = exclude(" Bearer , ApiKey ");
        assert!(!should_validate(&config, &authed("Bearer")));
        assert!(!should_validate(&config, &authed("ApiKey")));
        assert!(should_validate(&config, &authed("Cookies")));
    }

    #[test]
    fn require_authentication_does_not_change_authenticated_decisions() {
        let config = AuthorizationConfig::new(Some("Bearer"), None, true).unwrap();
        assert!(!should_validate(&config, &authed("Bearer")));
        assert!(should_validate(&config, &authed("Cookies")));
    }

    #[test]
    fn set_but_empty_lists_are_still_set() {
        // "" lists only the empty type, so named types are not included
        assert!(!should_validate(&include(""), &authed("Bearer")));
        // ...and not excluded
        assert!(should_validate(&exclude(" , "), &authed("Bearer")));
    }

    #[test]
    fn blank_element_matches_empty_auth_type() {
        assert!(should_validate(&include("Bearer, "), &authed("")));
        assert!(!should_validate(&include("Bearer"), &authed("")));

        assert!(!should_validate(&exclude("Bearer, "), &authed("")));
        assert!(should_validate(&exclude("Bearer"), &authed("")));
    }

    #[test]
    fn only_configured_lists_filter_by_auth_type() {
        assert!(!AuthorizationConfig::default().filters_by_auth_type());
        assert!(exclude("Bearer").filters_by_auth_type());
        assert!(include("").filters_by_auth_type());
    }

    #[test]
    fn rejects_both_lists() {
        let err = AuthorizationConfig::new(Some("Bearer"), Some("Cookies"), false).unwrap_err();
        assert!(matches!(err, ConfigError::Conflict(..)));
    }

    #[test]
    fn builds_from_settings() {
        let settings = AntiForgerySettings {
            include_auth_types: Some("Cookies".into()),
            require_authentication: true,
            ..Default::default()
        };
        let config = AuthorizationConfig::from_settings(&settings).unwrap();

        assert_eq!(config.exclude_auth_types(), None);
        assert_eq!(
            config.include_auth_types().map(AuthTypeList::as_slice),
            Some(&["Cookies".to_string()][..])
        );
        assert!(config.require_authentication());
    }
}
