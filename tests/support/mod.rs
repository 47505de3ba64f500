//! Shared test utilities: request fixtures and a sleeper that records
//! instead of waiting.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use peqy_trigger::trigger::{
    CommitSha, PullRequestNumber, RepositoryName, RepositoryOwner, Sleeper,
};
use peqy_trigger::{ApiKey, ReviewPayload, TriggerError};

pub const API_KEY: &str = "sk-0123456789abcdef0123456789abcdef";
pub const HEAD_SHA: &str = "0123456789abcdef0123456789abcdef01234567";

/// Builds the payload for `octocat/hello-world` at `pr`.
///
/// # Errors
///
/// Returns an error if any part fails validation.
pub fn review_payload(pr: u64) -> Result<ReviewPayload, TriggerError> {
    Ok(ReviewPayload::new(
        RepositoryOwner::new("octocat")?,
        RepositoryName::new("hello-world")?,
        PullRequestNumber::new(pr)?,
        CommitSha::new(HEAD_SHA)?,
    ))
}

/// The test API key.
///
/// # Errors
///
/// Returns an error if the key fails validation.
pub fn api_key() -> Result<ApiKey, TriggerError> {
    ApiKey::new(API_KEY)
}

/// Records requested delays and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Delays requested so far.
    #[must_use]
    pub fn delays(&self) -> Vec<Duration> {
        self.delays
            .lock()
            .map(|delays| delays.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, delay: Duration) {
        if let Ok(mut delays) = self.delays.lock() {
            delays.push(delay);
        }
    }
}
