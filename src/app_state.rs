use std::sync::Arc;

use crate::config::Config;
use crate::fetcher::{FetchError, PageFetcher};
use crate::llm::OpenRouterClient;
use crate::profiles::ProfileScout;
use crate::search::SerpApiClient;
use crate::upstream::UpstreamError;

/// Which provider API keys were supplied at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderStatus {
    pub openrouter_configured: bool,
    pub serpapi_configured: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub scout: Arc<ProfileScout>,
    pub providers: ProviderStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build API client: {0}")]
    Client(#[from] UpstreamError),
    #[error("failed to build page fetcher: {0}")]
    Fetcher(#[from] FetchError),
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        let llm = OpenRouterClient::new(
            config.openrouter_base_url(),
            config.openrouter_api_key().map(str::to_string),
            config.openrouter_model(),
        )?;
        let search = SerpApiClient::new(
            config.serpapi_base_url(),
            config.serpapi_api_key().map(str::to_string),
            config.serpapi_engine(),
        )?;

        let providers = ProviderStatus {
            openrouter_configured: llm.is_configured(),
            serpapi_configured: search.is_configured(),
        };

        let mut scout = ProfileScout::new(Arc::new(llm), Arc::new(search));
        if config.fetch_profile_pages() {
            scout = scout.with_page_fetcher(Arc::new(PageFetcher::new()?));
        }

        Ok(Self {
            scout: Arc::new(scout),
            providers,
        })
    }
}
