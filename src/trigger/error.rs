//! Error types exposed by the review trigger.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced while validating input or calling the review API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TriggerError {
    /// Configuration could not be loaded or holds out-of-range values.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The API key was missing or blank.
    #[error("API key is required")]
    MissingApiKey,

    /// The triggering event does not carry a pull request.
    #[error("event '{event_name}' does not include pull request context")]
    MissingPullRequestContext {
        /// Name of the event that triggered the run.
        event_name: String,
    },

    /// A field required to build the review payload was absent.
    #[error("event payload is missing required field: {field}")]
    MissingEventField {
        /// Dotted path of the missing field.
        field: &'static str,
    },

    /// The head commit SHA is not a 40 character lowercase hex string.
    #[error("invalid commit SHA format: {sha}")]
    InvalidSha {
        /// The rejected value.
        sha: String,
    },

    /// The pull request number is not a positive integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The event payload could not be read or decoded.
    #[error("event payload error: {message}")]
    Event {
        /// Details about the decoding failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Every attempt failed with a transient error.
    #[error("request failed after {attempts} attempts: {}", last_error.as_deref().unwrap_or("undefined"))]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Description of the last recorded transient failure, if any.
        last_error: Option<String>,
    },

    /// The API answered with a failure and the fail policy escalates it.
    #[error("API request failed with status {status_code} ({label})")]
    Rejected {
        /// HTTP status returned by the API.
        status_code: u16,
        /// Human readable status label.
        label: &'static str,
    },
}

impl TriggerError {
    /// Returns true for failures raised before any request is sent.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::MissingApiKey
                | Self::MissingPullRequestContext { .. }
                | Self::MissingEventField { .. }
                | Self::InvalidSha { .. }
                | Self::InvalidPullRequestNumber
                | Self::Event { .. }
        )
    }
}

/// Failure of a single transport call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportFailure {
    /// No response arrived within the per-attempt timeout.
    #[error("request timed out after {}ms", timeout.as_millis())]
    Timeout {
        /// The timeout that expired.
        timeout: Duration,
    },

    /// The request could not be sent or the response could not be read.
    #[error("network error: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },
}
