//! Errors shared by the clients of the hosted APIs the service depends on.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, StatusCode};
use thiserror::Error;

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY: usize = 300;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The external providers the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenRouter,
    SerpApi,
}

impl Display for Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenRouter => f.write_str("OpenRouter"),
            Provider::SerpApi => f.write_str("SerpAPI"),
        }
    }
}

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("request timeout")]
    Timeout,

    #[error("http error {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Classify a reqwest failure. The URL is stripped first because it can
    /// carry an API key in its query string.
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status,
                body: String::new(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// Build an `Http` error from a non-success response, keeping a bounded
    /// slice of the body for diagnostics.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::Http {
            status,
            body: truncate_chars(body.trim(), MAX_ERROR_BODY),
        }
    }
}

/// HTTP client shared by the API clients; `timeout` bounds the whole
/// exchange, body included.
pub(crate) fn http_client(timeout: Duration) -> Result<Client, UpstreamError> {
    ClientBuilder::new()
        .connect_timeout(timeout.min(CONNECT_TIMEOUT))
        .timeout(timeout)
        .build()
        .map_err(UpstreamError::from_reqwest_error)
}

pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
