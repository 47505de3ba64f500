//! Validated request configuration and the secret API key wrapper.

use std::fmt;
use std::time::Duration;

use url::Url;

use super::error::TriggerError;
use super::validate::validate_api_key;

/// Default review trigger endpoint.
pub const DEFAULT_API_URL: &str = "https://demo.peqy.ai/api/v1/checks/trigger";
/// Default per-attempt timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default number of attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const MIN_TIMEOUT_MS: u64 = 1_000;
const MAX_TIMEOUT_MS: u64 = 300_000;
const MIN_ATTEMPTS: u32 = 1;
const MAX_ATTEMPTS: u32 = 5;

/// Secret API key.
///
/// `Debug` and `Display` never reveal the value; call [`ApiKey::expose`] when
/// the key must go on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validates that the key is non-blank and trims whitespace.
    ///
    /// Keys shorter than 32 characters are accepted with a logged warning.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingApiKey`] when the supplied string is
    /// blank.
    pub fn new(key: impl AsRef<str>) -> Result<Self, TriggerError> {
        let trimmed = key.as_ref().trim();
        if !validate_api_key(trimmed) {
            return Err(TriggerError::MissingApiKey);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the raw key.
    #[must_use]
    pub const fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("***")
    }
}

/// Immutable settings for one trigger invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    url: Url,
    api_key: ApiKey,
    timeout: Duration,
    max_attempts: u32,
}

impl RequestConfig {
    /// Builds a configuration after checking ranges.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Configuration`] when `timeout_ms` is outside
    /// 1000..=300000 or `max_attempts` is outside 1..=5.
    pub fn new(
        url: Url,
        api_key: ApiKey,
        timeout_ms: u64,
        max_attempts: u32,
    ) -> Result<Self, TriggerError> {
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&timeout_ms) {
            return Err(TriggerError::Configuration {
                message: format!(
                    "timeout must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} milliseconds, got {timeout_ms}"
                ),
            });
        }
        if !(MIN_ATTEMPTS..=MAX_ATTEMPTS).contains(&max_attempts) {
            return Err(TriggerError::Configuration {
                message: format!(
                    "retry attempts must be between {MIN_ATTEMPTS} and {MAX_ATTEMPTS}, got {max_attempts}"
                ),
            });
        }

        Ok(Self {
            url,
            api_key,
            timeout: Duration::from_millis(timeout_ms),
            max_attempts,
        })
    }

    /// Target endpoint.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Secret API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Maximum number of attempts, at least one.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}
