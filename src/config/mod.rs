//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.peqy-trigger.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PEQY_API_KEY`, `PEQY_API_URL`, and so on
//! 4. **Command-line arguments** – `--api-key`/`-k`, `--api-url`/`-u`, ...
//!
//! The runner-provided `GITHUB_EVENT_NAME`, `GITHUB_EVENT_PATH` and
//! `GITHUB_OUTPUT` variables are used when the matching field is unset.
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "https://demo.peqy.ai/api/v1/checks/trigger"
//! timeout_ms = 30000
//! max_attempts = 3
//! fail_on_error = true
//! ```

use std::env;
use std::fmt;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::trigger::{
    ApiKey, DEFAULT_API_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_MS, FailPolicy, RequestConfig,
    TriggerError,
};

/// Name reported when the runner does not say which event fired.
pub const UNKNOWN_EVENT: &str = "unknown";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `PEQY_API_KEY` or `--api-key`: Peqy API key (required)
/// - `PEQY_API_URL` or `--api-url`: Review trigger endpoint
/// - `PEQY_TIMEOUT_MS` or `--timeout-ms`: Per-attempt timeout (1000-300000)
/// - `PEQY_MAX_ATTEMPTS` or `--max-attempts`: Attempt budget (1-5)
/// - `PEQY_FAIL_ON_ERROR` or `--fail-on-error`: Fail the step on API errors
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use peqy_trigger::TriggerConfig;
///
/// let config = TriggerConfig::load().expect("failed to load configuration");
/// let request = config.request_config().expect("valid request settings");
/// ```
#[derive(Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PEQY",
    discovery(
        dotfile_name = ".peqy-trigger.toml",
        config_file_name = "peqy-trigger.toml",
        app_name = "peqy-trigger"
    )
)]
pub struct TriggerConfig {
    /// API key sent in the `X-API-Key` header.
    ///
    /// Can be provided via:
    /// - CLI: `--api-key <KEY>` or `-k <KEY>`
    /// - Environment: `PEQY_API_KEY`
    /// - Config file: `api_key = "..."`
    #[ortho_config(cli_short = 'k')]
    pub api_key: Option<String>,

    /// Review trigger endpoint.
    ///
    /// Defaults to the Peqy demo endpoint.
    #[ortho_config(cli_short = 'u')]
    pub api_url: String,

    /// Per-attempt timeout in milliseconds, between 1000 and 300000.
    #[ortho_config()]
    pub timeout_ms: u64,

    /// Number of attempts, between 1 and 5.
    #[ortho_config(cli_short = 'r')]
    pub max_attempts: u32,

    /// Whether a rejected request fails the step.
    ///
    /// Unset means `true`. Retry exhaustion always fails the step.
    #[ortho_config()]
    pub fail_on_error: Option<bool>,

    /// Name of the triggering event; falls back to `GITHUB_EVENT_NAME`.
    #[ortho_config()]
    pub event_name: Option<String>,

    /// Path to the event payload JSON; falls back to `GITHUB_EVENT_PATH`.
    #[ortho_config()]
    pub event_path: Option<String>,

    /// Step output file; falls back to `GITHUB_OUTPUT`.
    ///
    /// When neither is set, outputs are printed to stdout.
    #[ortho_config()]
    pub output_path: Option<String>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            fail_on_error: None,
            event_name: None,
            event_path: None,
            output_path: None,
        }
    }
}

impl fmt::Debug for TriggerConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TriggerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_attempts", &self.max_attempts)
            .field("fail_on_error", &self.fail_on_error)
            .field("event_name", &self.event_name)
            .field("event_path", &self.event_path)
            .field("output_path", &self.output_path)
            .finish()
    }
}

impl TriggerConfig {
    /// Returns the API key or an error if it is missing or blank.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingApiKey`] when no source provides a
    /// non-blank key.
    pub fn require_api_key(&self) -> Result<ApiKey, TriggerError> {
        self.api_key
            .as_deref()
            .ok_or(TriggerError::MissingApiKey)
            .and_then(ApiKey::new)
    }

    /// Validates ranges and builds the executor configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingApiKey`] without a key and
    /// [`TriggerError::Configuration`] for an unparsable URL or out-of-range
    /// timeout or attempt count.
    pub fn request_config(&self) -> Result<RequestConfig, TriggerError> {
        let api_key = self.require_api_key()?;
        let url = Url::parse(&self.api_url).map_err(|error| TriggerError::Configuration {
            message: format!("API URL is invalid: {error}"),
        })?;
        RequestConfig::new(url, api_key, self.timeout_ms, self.max_attempts)
    }

    /// Policy applied to rejected requests.
    #[must_use]
    pub fn fail_policy(&self) -> FailPolicy {
        FailPolicy::from_flag(self.fail_on_error.unwrap_or(true))
    }

    /// Resolves the event name from configuration or `GITHUB_EVENT_NAME`.
    #[must_use]
    pub fn resolve_event_name(&self) -> String {
        self.event_name
            .clone()
            .or_else(|| env::var("GITHUB_EVENT_NAME").ok())
            .unwrap_or_else(|| UNKNOWN_EVENT.to_owned())
    }

    /// Resolves the event payload path from configuration or
    /// `GITHUB_EVENT_PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Configuration`] when no path is available.
    pub fn require_event_path(&self) -> Result<Utf8PathBuf, TriggerError> {
        self.event_path
            .clone()
            .or_else(|| env::var("GITHUB_EVENT_PATH").ok())
            .map(Utf8PathBuf::from)
            .ok_or_else(|| TriggerError::Configuration {
                message: "event payload path is required (use --event-path or GITHUB_EVENT_PATH)"
                    .to_owned(),
            })
    }

    /// Resolves the output file from configuration or `GITHUB_OUTPUT`.
    #[must_use]
    pub fn resolve_output_path(&self) -> Option<Utf8PathBuf> {
        self.output_path
            .clone()
            .or_else(|| env::var("GITHUB_OUTPUT").ok())
            .filter(|path| !path.is_empty())
            .map(Utf8PathBuf::from)
    }
}
