use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::search::types::{SearchHit, SerpApiResponse};
use crate::upstream::{UpstreamError, http_client};

const RESULTS_PER_QUERY: u32 = 20;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// SerpAPI reports an empty result page as an error string on a 200 response.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// Runs a web search and returns its organic results in rank order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, UpstreamError>;
}

/// Search query used to surface profile pages for a keyword.
pub fn profile_query(keyword: &str) -> String {
    format!("{} profile OR linkedin OR github", keyword.trim())
}

/// SerpAPI search client.
#[derive(Debug, Clone)]
pub struct SerpApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    engine: String,
}

impl SerpApiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        engine: impl Into<String>,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: http_client(REQUEST_TIMEOUT)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            engine: engine.into(),
        })
    }

    /// Replace the default 30 s request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, UpstreamError> {
        self.http = http_client(timeout)?;
        Ok(self)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn search_url(&self) -> String {
        format!("{}/search.json", self.base_url)
    }
}

#[async_trait]
impl WebSearch for SerpApiClient {
    #[instrument(skip(self), fields(engine = %self.engine))]
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;
        let num = RESULTS_PER_QUERY.to_string();

        let response = self
            .http
            .get(self.search_url())
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("api_key", api_key),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(UpstreamError::from_reqwest_error)?;

        if !response.status().is_success() {
            return Err(UpstreamError::from_response(response).await);
        }

        let body: SerpApiResponse = response
            .json()
            .await
            .map_err(UpstreamError::from_reqwest_error)?;

        if let Some(error) = body.error {
            if error.contains(NO_RESULTS_MARKER) {
                debug!("Search returned no results");
                return Ok(Vec::new());
            }
            return Err(UpstreamError::Rejected(error));
        }

        debug!(count = body.organic_results.len(), "Search returned results");
        Ok(body.organic_results)
    }
}
