//! Review trigger core: validation, retrying execution and reporting.
//!
//! A [`ReviewPayload`] and a [`RequestConfig`] are built and validated before
//! any request is sent. [`RequestExecutor`] then posts the payload, backing off
//! between transient failures, and [`TriggerReport`] turns the outcome into
//! platform outputs and a verdict under the caller's [`FailPolicy`].

pub mod backoff;
pub mod error;
pub mod executor;
pub mod payload;
pub mod report;
pub mod request;
pub mod transport;
pub mod validate;

pub use backoff::{Sleeper, TokioSleeper, delay_for_attempt};
pub use error::{TransportFailure, TriggerError};
pub use executor::{AttemptOutcome, RequestExecutor, RequestResult};
pub use payload::{CommitSha, PullRequestNumber, RepositoryName, RepositoryOwner, ReviewPayload};
pub use report::{FailPolicy, TriggerOutputs, TriggerReport, Verdict, status_label};
pub use request::{
    ApiKey, DEFAULT_API_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_MS, RequestConfig,
};
pub use transport::{
    API_KEY_HEADER, CLIENT_USER_AGENT, OutgoingRequest, ReqwestTransport, Transport,
    TransportResponse,
};
pub use validate::{validate_api_key, validate_sha};
