//! Relay configuration parsed from environment variables.
//!
//! The credential pair is required: the relay refuses to start without it.
//! Everything else has a default.

pub const DEFAULT_TRELLO_API_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading relay configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required credential variable is unset or empty.
    #[error("missing credential: env var {var} not set")]
    MissingCredential { var: &'static str },

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Static credential pair attached to every provider call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub credentials: Credentials,
    pub api_base_url: String,
    pub port: u16,
    pub timeouts: ProviderTimeouts,
}

impl RelayConfig {
    /// Build typed relay config from environment variables.
    ///
    /// Required:
    /// - `TRELLO_KEY`
    /// - `TRELLO_TOKEN`
    ///
    /// Optional:
    /// - `TRELLO_API_BASE_URL`: default `https://api.trello.com/1`
    /// - `PORT`: default 5000
    /// - `TRELLO_REQUEST_TIMEOUT_SECS`: default 30
    /// - `TRELLO_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is missing or `PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let key = require_env("TRELLO_KEY")?;
        let token = require_env("TRELLO_TOKEN")?;

        let api_base_url = std::env::var("TRELLO_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TRELLO_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let timeouts = ProviderTimeouts {
            request_secs: env_parse_u64("TRELLO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("TRELLO_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { credentials: Credentials { key, token }, api_base_url, port, timeouts })
    }
}

fn require_env(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential { var }),
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::Parse(format!("invalid PORT: {value}"))),
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
