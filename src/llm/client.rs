use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::llm::{
    keywords::{build_prompt, parse_keywords},
    types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage},
};
use crate::upstream::{UpstreamError, http_client};

const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns free text into search keywords about the people it mentions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, UpstreamError>;
}

/// OpenRouter chat-completions client.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenRouterClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: http_client(REQUEST_TIMEOUT)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
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

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl KeywordExtractor for OpenRouterClient {
    #[instrument(skip_all, fields(model = %self.model, text_len = text.len()))]
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;

        let prompt = build_prompt(text);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(UpstreamError::from_reqwest_error)?;

        if !response.status().is_success() {
            return Err(UpstreamError::from_response(response).await);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(UpstreamError::from_reqwest_error)?;

        let content = completion
            .first_content()
            .ok_or_else(|| UpstreamError::Decode("completion has no choices".to_string()))?;

        let keywords = parse_keywords(content);
        debug!(count = keywords.len(), ?keywords, "Extracted keywords");

        Ok(keywords)
    }
}
