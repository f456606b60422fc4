//! Minimal HTTP GET client
//!
//! Every request carries the addon user-agent and a per-call timeout.
//! No retries. Failures come back as a typed [`FetchError`] so callers can
//! tell a timeout from a bad body, even though the addon treats them alike.

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a GET produced no data
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// HTTP client with a fixed user-agent
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    target: "subtis",
                    "Failed to build HTTP client with user-agent {:?}: {}",
                    user_agent,
                    e
                );
                reqwest::Client::new()
            });

        Self { client }
    }

    /// GET the full body as bytes
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        debug!(target: "subtis", "GET {}", url);

        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    /// GET and decode the body as strict UTF-8 text
    pub async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let body = self.get(url, timeout).await?;
        String::from_utf8(body).map_err(|e| FetchError::Decode(format!("not UTF-8: {}", e)))
    }

    /// GET and decode the body as JSON
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<T, FetchError> {
        let body = self.get(url, timeout).await?;
        serde_json::from_slice(&body)
            .map_err(|e| FetchError::Decode(format!("JSON parse error: {}", e)))
    }
}
