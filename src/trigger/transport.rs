//! HTTP transport used by the request executor.
//!
//! The [`Transport`] trait keeps the executor independent of the HTTP stack so
//! tests can script responses, while [`ReqwestTransport`] performs the real
//! POST with the per-attempt timeout applied.

use std::time::Duration;

use async_trait::async_trait;
use http::header::{CONTENT_TYPE, HeaderName};
use reqwest::Client;
use reqwest::redirect::Policy;
use url::Url;

use super::error::{TransportFailure, TriggerError};
use super::request::ApiKey;

/// Header carrying the API key.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Fixed client identifier sent as `User-Agent`.
pub const CLIENT_USER_AGENT: &str = concat!("peqy-trigger/", env!("CARGO_PKG_VERSION"));

/// One POST request, reused unchanged across attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// Target endpoint.
    pub url: Url,
    /// Secret API key for the `X-API-Key` header.
    pub api_key: ApiKey,
    /// JSON-encoded body.
    pub body: String,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response from a status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// POST-with-timeout primitive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`TransportFailure::Timeout`] when no response arrives in time
    /// and [`TransportFailure::Network`] for any other transport failure.
    async fn post(&self, request: &OutgoingRequest) -> Result<TransportResponse, TransportFailure>;
}

/// Transport backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the fixed user agent.
    ///
    /// Redirects are never followed: a `3xx` reaches the executor as is and
    /// the API key is only ever sent to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new() -> Result<Self, TriggerError> {
        let client = Client::builder()
            .user_agent(CLIENT_USER_AGENT)
            .redirect(Policy::none())
            .build()
            .map_err(|error| TriggerError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, request: &OutgoingRequest) -> Result<TransportResponse, TransportFailure> {
        let response = self
            .client
            .post(request.url.clone())
            .timeout(request.timeout)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, request.api_key.expose())
            .body(request.body.clone())
            .send()
            .await
            .map_err(|error| map_reqwest_error(&error, request.timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| map_reqwest_error(&error, request.timeout))?;

        Ok(TransportResponse { status, body })
    }
}

fn map_reqwest_error(error: &reqwest::Error, timeout: Duration) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Timeout { timeout }
    } else {
        TransportFailure::Network {
            message: error.to_string(),
        }
    }
}
