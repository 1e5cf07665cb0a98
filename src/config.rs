/*
 * Responsibility
 * - Load settings from environment variables (PORT, CORS, anti-forgery policy, etc.)
 * - Validate settings (fail at startup when something is malformed or contradictory)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_ANTIFORGERY_COOKIE_NAME: &str = "__RequestVerificationToken";
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "session_id";
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
    Conflict(&'static str, &'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::Conflict(a, b) => {
                write!(f, "conflicting configuration: {} and {} cannot both be set", a, b)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw anti-forgery settings as the integrator wrote them.
///
/// Parsing the lists and rejecting contradictory combinations happens in
/// `AuthorizationConfig::new`, so the same rules apply to code-built configs.
#[derive(Debug, Clone, Default)]
pub struct AntiForgerySettings {
    pub exclude_auth_types: Option<String>,
    pub include_auth_types: Option<String>,
    pub require_authentication: bool,
    pub cookie_name: String,
    pub max_token_length: usize,
}

pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub request_body_limit_bytes: usize,
    pub request_timeout_seconds: u64,

    pub session_cookie_name: String,
    pub antiforgery: AntiForgerySettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (env in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_body_limit_bytes = match non_blank(lookup("REQUEST_BODY_LIMIT_BYTES")) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            None => 1024 * 1024,
        };

        // A zero timeout would fail every request
        let request_timeout_seconds = match non_blank(lookup("REQUEST_TIMEOUT_SECONDS")) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        let session_cookie_name = non_blank(lookup("SESSION_COOKIE_NAME"))
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string());

        // Empty list variables count as unset; `.env` files often carry `KEY=`.
        let exclude_auth_types = non_blank(lookup("ANTIFORGERY_EXCLUDE_AUTH_TYPES"));
        let include_auth_types = non_blank(lookup("ANTIFORGERY_INCLUDE_AUTH_TYPES"));

        if exclude_auth_types.is_some() && include_auth_types.is_some() {
            return Err(ConfigError::Conflict(
                "ANTIFORGERY_EXCLUDE_AUTH_TYPES",
                "ANTIFORGERY_INCLUDE_AUTH_TYPES",
            ));
        }

        let require_authentication = match non_blank(lookup("ANTIFORGERY_REQUIRE_AUTHENTICATION")) {
            Some(raw) => parse_bool(&raw)
                .ok_or(ConfigError::Invalid("ANTIFORGERY_REQUIRE_AUTHENTICATION"))?,
            None => false,
        };

        let cookie_name = non_blank(lookup("ANTIFORGERY_COOKIE_NAME"))
            .unwrap_or_else(|| DEFAULT_ANTIFORGERY_COOKIE_NAME.to_string());

        let max_token_length = match non_blank(lookup("ANTIFORGERY_MAX_TOKEN_LENGTH")) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("ANTIFORGERY_MAX_TOKEN_LENGTH"))?,
            None => DEFAULT_MAX_TOKEN_LENGTH,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_body_limit_bytes,
            request_timeout_seconds,
            session_cookie_name,
            antiforgery: AntiForgerySettings {
                exclude_auth_types,
                include_auth_types,
                require_authentication,
                cookie_name,
                max_token_length,
            },
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
