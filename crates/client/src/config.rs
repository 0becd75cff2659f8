//! Client configuration (environment-driven).

use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const API_URL_ENV: &str = "STOCKDESK_API_URL";
pub const AUTH_TOKEN_ENV: &str = "STOCKDESK_AUTH_TOKEN";
pub const TIMEOUT_ENV: &str = "STOCKDESK_TIMEOUT_SECS";
pub const PAGE_SIZE_ENV: &str = "STOCKDESK_PAGE_SIZE";

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Connection settings for the backend REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: Url,
    token: Option<String>,
    timeout: Duration,
    page_size: u32,
}

impl ClientConfig {
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Build configuration from `STOCKDESK_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (used by `from_env`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&api_url)?;

        if let Some(token) = lookup(AUTH_TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            config.token = Some(token);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = parse_positive(TIMEOUT_ENV, &raw)?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            let size = parse_positive(PAGE_SIZE_ENV, &raw)?;
            config.page_size = u32::try_from(size).map_err(|_| ConfigError::Invalid {
                name: PAGE_SIZE_ENV,
                reason: format!("{size} is too large"),
            })?;
        }

        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        name: API_URL_ENV,
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            name: API_URL_ENV,
            reason: format!("{raw} is not an http(s) base URL"),
        });
    }

    // Endpoint paths are joined onto the base, so it must end with a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Invalid {
            name,
            reason: format!("{raw:?}: {e}"),
        }),
    }
}
