//! Review payload and the identity wrappers it is built from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TriggerError;
use super::validate::validate_sha;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingEventField`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, TriggerError> {
        if value.trim().is_empty() {
            return Err(TriggerError::MissingEventField {
                field: "repository.owner.login",
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for RepositoryOwner {
    type Error = TriggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<RepositoryOwner> for String {
    fn from(value: RepositoryOwner) -> Self {
        value.0
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the repository name is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingEventField`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, TriggerError> {
        if value.trim().is_empty() {
            return Err(TriggerError::MissingEventField {
                field: "repository.name",
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for RepositoryName {
    type Error = TriggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<RepositoryName> for String {
    fn from(value: RepositoryName) -> Self {
        value.0
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, TriggerError> {
        if value == 0 {
            return Err(TriggerError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for PullRequestNumber {
    type Error = TriggerError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PullRequestNumber> for u64 {
    fn from(value: PullRequestNumber) -> Self {
        value.0
    }
}

/// Full 40 character lowercase commit SHA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitSha(String);

impl CommitSha {
    /// Validates the SHA shape.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::InvalidSha`] unless the value is exactly 40
    /// lowercase hex digits.
    pub fn new(value: &str) -> Result<Self, TriggerError> {
        if !validate_sha(value) {
            return Err(TriggerError::InvalidSha {
                sha: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the SHA value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for CommitSha {
    type Error = TriggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CommitSha> for String {
    fn from(value: CommitSha) -> Self {
        value.0
    }
}

/// Body posted to the review trigger endpoint.
///
/// Serializes as `{"owner": .., "repo": .., "pr": .., "sha": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPayload {
    owner: RepositoryOwner,
    repo: RepositoryName,
    pr: PullRequestNumber,
    sha: CommitSha,
}

impl ReviewPayload {
    /// Assembles a payload from already validated parts.
    #[must_use]
    pub const fn new(
        owner: RepositoryOwner,
        repo: RepositoryName,
        pr: PullRequestNumber,
        sha: CommitSha,
    ) -> Self {
        Self {
            owner,
            repo,
            pr,
            sha,
        }
    }

    /// Extracts the payload from a platform pull request event.
    ///
    /// Reads `repository.owner.login`, `repository.name`,
    /// `pull_request.number` and `pull_request.head.sha`.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::MissingPullRequestContext`] when the event has
    /// no `pull_request` object, [`TriggerError::MissingEventField`] for any
    /// absent field, and [`TriggerError::InvalidSha`] or
    /// [`TriggerError::InvalidPullRequestNumber`] for malformed values.
    pub fn from_event(event_name: &str, event: &Value) -> Result<Self, TriggerError> {
        let pull_request = event
            .get("pull_request")
            .filter(|value| value.is_object())
            .ok_or_else(|| TriggerError::MissingPullRequestContext {
                event_name: event_name.to_owned(),
            })?;

        let owner = string_field(
            event,
            &["repository", "owner", "login"],
            "repository.owner.login",
        )?;
        let repo = string_field(event, &["repository", "name"], "repository.name")?;
        let number = pull_request
            .get("number")
            .ok_or(TriggerError::MissingEventField {
                field: "pull_request.number",
            })?
            .as_u64()
            .ok_or(TriggerError::InvalidPullRequestNumber)?;
        let sha = string_field(pull_request, &["head", "sha"], "pull_request.head.sha")?;

        Ok(Self::new(
            RepositoryOwner::new(owner)?,
            RepositoryName::new(repo)?,
            PullRequestNumber::new(number)?,
            CommitSha::new(sha)?,
        ))
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repo(&self) -> &RepositoryName {
        &self.repo
    }

    /// Pull request number.
    #[must_use]
    pub const fn pr(&self) -> PullRequestNumber {
        self.pr
    }

    /// Head commit SHA.
    #[must_use]
    pub const fn sha(&self) -> &CommitSha {
        &self.sha
    }

    /// Serializes the payload into the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Event`] if serialization fails.
    pub fn to_body(&self) -> Result<String, TriggerError> {
        serde_json::to_string(self).map_err(|error| TriggerError::Event {
            message: format!("failed to encode review payload: {error}"),
        })
    }
}

fn string_field<'event>(
    root: &'event Value,
    path: &[&str],
    field: &'static str,
) -> Result<&'event str, TriggerError> {
    path.iter()
        .try_fold(root, |node, key| node.get(key))
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(TriggerError::MissingEventField { field })
}
