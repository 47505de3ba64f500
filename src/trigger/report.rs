//! Maps executor results into platform outputs and a verdict.

use super::error::TriggerError;
use super::executor::RequestResult;

/// Whether a classified API failure should fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPolicy {
    /// Escalate a failed result to a fatal error.
    FailOnError,
    /// Report a failed result as a warning only.
    WarnOnError,
}

impl FailPolicy {
    /// Maps the `fail_on_error` flag to a policy.
    #[must_use]
    pub const fn from_flag(fail_on_error: bool) -> Self {
        if fail_on_error {
            Self::FailOnError
        } else {
            Self::WarnOnError
        }
    }
}

/// Human readable label for a status code, used only in diagnostics.
#[must_use]
pub const fn status_label(status_code: u16) -> &'static str {
    match status_code {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        200..=299 => "OK",
        400..=499 => "Client Error",
        500.. => "Server Error",
        _ => "Unexpected Status",
    }
}

/// The three named outputs recorded for the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOutputs {
    /// String-encoded status code; empty when no response was classified.
    pub status_code: String,
    /// Raw response body.
    pub response: String,
    /// `"true"` or `"false"`.
    pub success: String,
}

impl TriggerOutputs {
    /// Outputs for a terminal result.
    #[must_use]
    pub fn from_result(result: &RequestResult) -> Self {
        Self {
            status_code: result.status_code.to_string(),
            response: result.body.clone(),
            success: result.success.to_string(),
        }
    }

    /// Outputs for a run that never produced a result.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            status_code: String::new(),
            response: String::new(),
            success: false.to_string(),
        }
    }

    /// Named pairs in the order they are recorded.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("status-code", self.status_code.as_str()),
            ("response", self.response.as_str()),
            ("success", self.success.as_str()),
        ]
    }
}

/// How the run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The review was triggered.
    Passed,
    /// The API rejected the request but the policy tolerates it.
    Warned(String),
    /// The run must fail.
    Failed(TriggerError),
}

impl Verdict {
    /// True when the process should exit unsuccessfully.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Outputs plus verdict for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerReport {
    /// Values to record in the output sink.
    pub outputs: TriggerOutputs,
    /// Final disposition of the run.
    pub verdict: Verdict,
}

impl TriggerReport {
    /// Builds the report for an executor outcome.
    ///
    /// Errors (preconditions and exhaustion) always fail the run; a failed
    /// result fails it only under [`FailPolicy::FailOnError`].
    #[must_use]
    pub fn from_outcome(outcome: Result<RequestResult, TriggerError>, policy: FailPolicy) -> Self {
        match outcome {
            Ok(result) => Self::from_result(&result, policy),
            Err(error) => Self {
                outputs: TriggerOutputs::failed(),
                verdict: Verdict::Failed(error),
            },
        }
    }

    fn from_result(result: &RequestResult, policy: FailPolicy) -> Self {
        let outputs = TriggerOutputs::from_result(result);
        if result.success {
            return Self {
                outputs,
                verdict: Verdict::Passed,
            };
        }

        let label = status_label(result.status_code);
        let verdict = match policy {
            FailPolicy::FailOnError => Verdict::Failed(TriggerError::Rejected {
                status_code: result.status_code,
                label,
            }),
            FailPolicy::WarnOnError => Verdict::Warned(format!(
                "API request failed with status {} ({label})",
                result.status_code
            )),
        };
        Self { outputs, verdict }
    }
}
