//! Client configuration.
//!
//! The base URL comes from the environment so deployments can point the
//! client at staging or production backends without a rebuild.

use std::env;
use std::time::Duration;

use url::Url;

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "CAMPUS_API_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the HTTP adapter.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL; request paths are resolved against it.
    pub base_url: Url,
    /// Transport-level request timeout.
    pub timeout: Duration,
}

/// Configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The base URL did not parse.
    #[error("invalid base URL {value:?}: {source}")]
    InvalidBaseUrl {
        /// The offending value.
        value: String,
        /// Parser diagnostic.
        source: url::ParseError,
    },
}

impl ClientConfig {
    /// Build a configuration from an explicit base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Parse a configuration from a raw base URL string.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] when the value does not parse.
    pub fn from_base_url(raw: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            value: raw.to_owned(),
            source,
        })?;
        Ok(Self::new(base_url))
    }

    /// Read the configuration from the environment, falling back to the
    /// local development backend.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] when the configured value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Self::from_base_url(&raw)
    }

    /// Override the transport timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn parses_the_default_base_url() {
        let config = ClientConfig::from_base_url(DEFAULT_BASE_URL).expect("default parses");
        assert_eq!(config.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn rejects_unparseable_base_urls() {
        let error = ClientConfig::from_base_url("not a url").expect_err("must fail");
        assert!(matches!(error, ConfigError::InvalidBaseUrl { .. }));
    }
}
