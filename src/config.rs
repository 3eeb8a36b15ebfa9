// Client configuration. The core never assumes an endpoint: the caller
// builds a `ClientConfig` explicitly (the CLI supplies its own default).

use crate::error::ConfigError;
use std::time::Duration;
use url::Url;

/// Immutable settings shared by every request an `ApiClient` issues.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: Url,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Parse and check a base URL such as `http://localhost:8080` or
    /// `https://hr.example.com/api/`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedBaseUrl(base_url.to_string()));
        }
        Ok(ClientConfig {
            base_url: url,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
