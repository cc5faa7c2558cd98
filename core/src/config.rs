//! Client configuration: the secret key and the API host.

use std::fmt;

use crate::error::ApiError;

/// Production Paystack host.
pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// Environment variable holding the secret key.
pub const API_KEY_ENV: &str = "PAYSTACK_SECRET_KEY";

/// Environment variable overriding the API host.
pub const BASE_URL_ENV: &str = "PAYSTACK_BASE_URL";

/// Read-only settings shared by every call a client makes.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build a config from `PAYSTACK_SECRET_KEY` and, if set,
    /// `PAYSTACK_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{API_KEY_ENV} is not set")))?;
        let config = Self::new(api_key);
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Ok(config.with_base_url(url.trim())),
            _ => Ok(config),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
