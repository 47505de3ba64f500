//! Retrying request executor.
//!
//! Each attempt posts the payload once and classifies the answer:
//!
//! - `2xx` ends the loop with a successful [`RequestResult`].
//! - `4xx` ends the loop with an unsuccessful [`RequestResult`]; client
//!   errors are never retried.
//! - `5xx` and transport failures are transient. They are retried after
//!   [`delay_for_attempt`] until the attempt budget runs out, at which point
//!   [`TriggerError::Exhausted`] is returned.
//!
//! Any other status (notably `3xx`) is left unclassified: it does not touch
//! the last recorded error and falls through to the retry decision.

use super::backoff::{Sleeper, delay_for_attempt};
use super::error::{TransportFailure, TriggerError};
use super::payload::ReviewPayload;
use super::request::RequestConfig;
use super::transport::{OutgoingRequest, Transport, TransportResponse};

/// Terminal business outcome of a trigger call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    /// True for a `2xx` response.
    pub success: bool,
    /// HTTP status returned by the API.
    pub status_code: u16,
    /// Raw response body.
    pub body: String,
}

/// Classification of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// `2xx` response.
    Success(TransportResponse),
    /// `4xx` response.
    ClientError(TransportResponse),
    /// `5xx` response.
    ServerError(TransportResponse),
    /// Timeout or network failure.
    TransportError(TransportFailure),
    /// A status outside every classified range.
    Unclassified(TransportResponse),
}

impl AttemptOutcome {
    /// Classifies a transport result.
    #[must_use]
    pub fn classify(result: Result<TransportResponse, TransportFailure>) -> Self {
        match result {
            Err(failure) => Self::TransportError(failure),
            Ok(response) => match response.status {
                200..=299 => Self::Success(response),
                400..=499 => Self::ClientError(response),
                500.. => Self::ServerError(response),
                _ => Self::Unclassified(response),
            },
        }
    }
}

/// Drives the attempt loop against a transport.
pub struct RequestExecutor<'deps, T, S>
where
    T: Transport,
    S: Sleeper,
{
    transport: &'deps T,
    sleeper: &'deps S,
}

impl<'deps, T, S> RequestExecutor<'deps, T, S>
where
    T: Transport,
    S: Sleeper,
{
    /// Creates an executor using the provided transport and sleeper.
    #[must_use]
    pub const fn new(transport: &'deps T, sleeper: &'deps S) -> Self {
        Self { transport, sleeper }
    }

    /// Posts `payload` until it succeeds, is rejected, or attempts run out.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Exhausted`] when every attempt ended in a
    /// transient failure (or an unclassified status), and
    /// [`TriggerError::Event`] if the payload cannot be encoded.
    pub async fn execute(
        &self,
        config: &RequestConfig,
        payload: &ReviewPayload,
    ) -> Result<RequestResult, TriggerError> {
        let request = OutgoingRequest {
            url: config.url().clone(),
            api_key: config.api_key().clone(),
            body: payload.to_body()?,
            timeout: config.timeout(),
        };
        let max_attempts = config.max_attempts();
        let mut last_error: Option<String> = None;

        for attempt in 1..=max_attempts {
            tracing::info!(attempt, max_attempts, "sending review trigger request");

            match AttemptOutcome::classify(self.transport.post(&request).await) {
                AttemptOutcome::Success(response) => {
                    tracing::info!(status = response.status, "review trigger accepted");
                    return Ok(RequestResult {
                        success: true,
                        status_code: response.status,
                        body: response.body,
                    });
                }
                AttemptOutcome::ClientError(response) => {
                    tracing::warn!(status = response.status, "review trigger rejected");
                    return Ok(RequestResult {
                        success: false,
                        status_code: response.status,
                        body: response.body,
                    });
                }
                AttemptOutcome::ServerError(response) => {
                    tracing::warn!(attempt, status = response.status, "server error");
                    last_error = Some(format!("HTTP {}: {}", response.status, response.body));
                }
                AttemptOutcome::TransportError(failure) => {
                    tracing::warn!(attempt, %failure, "transport failure");
                    last_error = Some(failure.to_string());
                }
                AttemptOutcome::Unclassified(response) => {
                    tracing::debug!(attempt, status = response.status, "unclassified status");
                }
            }

            if attempt < max_attempts {
                let delay = delay_for_attempt(attempt);
                tracing::info!(delay_secs = delay.as_secs(), "retrying after backoff");
                self.sleeper.sleep(delay).await;
            }
        }

        Err(TriggerError::Exhausted {
            attempts: max_attempts,
            last_error,
        })
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
