//! Runtime configuration read from environment variables.

use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

const API_URL_VAR: &str = "LISTING_API_URL";
const REQUEST_TIMEOUT_VAR: &str = "LISTING_REQUEST_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid http(s) URL: {value}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Settings injected into the API client at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the rental API, without a trailing slash
    pub api_base_url: String,
    /// Per-request timeout for every API call
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// - `LISTING_API_URL`: base URL (default `http://localhost:8080`)
    /// - `LISTING_REQUEST_TIMEOUT_SECS`: request timeout (default 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup(API_URL_VAR) {
            Some(raw) if !raw.trim().is_empty() => parse_base_url(&raw)?,
            _ => DEFAULT_API_URL.to_string(),
        };

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidTimeout { var: REQUEST_TIMEOUT_VAR, value: raw.clone() })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self { api_base_url, request_timeout })
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = || ConfigError::InvalidUrl { var: API_URL_VAR, value: raw.to_string() };

    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }

    Ok(trimmed.to_string())
}
