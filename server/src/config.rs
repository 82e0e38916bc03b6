//! Gateway configuration parsed from environment variables.
//!
//! Every constructor has a `from_lookup` twin taking the variable source as a
//! closure, so tests can feed values without touching the process env.

use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;
/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing env var {var}")]
    Missing { var: &'static str },

    /// A variable is set but does not parse.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Parse a boolean flag: `1/true/yes/on` or `0/false/no/off`, case-insensitive.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn lookup_parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Upstream identity provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeouts: IdentityTimeouts,
}

impl IdentityConfig {
    /// Build from the process environment.
    ///
    /// Required:
    /// - `IDENTITY_API_KEY`
    ///
    /// Optional:
    /// - `IDENTITY_BASE_URL`: default Identity Toolkit v1 endpoint
    /// - `IDENTITY_REQUEST_TIMEOUT_SECS`: default 15
    /// - `IDENTITY_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// `Missing` when the API key is unset, `Invalid` on unparsable timeouts.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    /// # Errors
    ///
    /// See [`IdentityConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("IDENTITY_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing { var: "IDENTITY_API_KEY" })?;
        let base_url = lookup("IDENTITY_BASE_URL")
            .unwrap_or_else(|| DEFAULT_IDENTITY_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let timeouts = IdentityTimeouts {
            request_secs: lookup_parse(&lookup, "IDENTITY_REQUEST_TIMEOUT_SECS", DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS)?,
            connect_secs: lookup_parse(&lookup, "IDENTITY_CONNECT_TIMEOUT_SECS", DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS)?,
        };
        Ok(Self { api_key, base_url, timeouts })
    }
}

/// Listener and session-cookie settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayConfig {
    pub port: u16,
    pub session_ttl: Duration,
    pub cookie_secure: bool,
}

impl GatewayConfig {
    /// Build from `PORT`, `SESSION_TTL_SECS` and `COOKIE_SECURE`.
    ///
    /// When `COOKIE_SECURE` is unset, cookies are marked secure iff
    /// `GOOGLE_REDIRECT_URI` is an `https://` URL.
    ///
    /// # Errors
    ///
    /// `Invalid` on an unparsable port or flag, or a TTL outside
    /// `1..=MAX_SESSION_TTL_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    /// # Errors
    ///
    /// See [`GatewayConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup_parse(&lookup, "PORT", DEFAULT_PORT)?;
        let ttl_secs = lookup_parse(&lookup, "SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;
        if ttl_secs == 0 || ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(ConfigError::Invalid { var: "SESSION_TTL_SECS", value: ttl_secs.to_string() });
        }
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => lookup("GOOGLE_REDIRECT_URI").is_some_and(|uri| uri.starts_with("https://")),
        };
        Ok(Self { port, session_ttl: Duration::from_secs(ttl_secs), cookie_secure })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
