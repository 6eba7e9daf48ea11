use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::profiles::dtos::ErrorResponse;
use crate::upstream::{Provider, UpstreamError};

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} API key not configured")]
    NotConfigured(Provider),

    #[error("{provider} API error: {source}")]
    Upstream {
        provider: Provider,
        #[source]
        source: UpstreamError,
    },
}

impl ScoutError {
    pub fn upstream(provider: Provider, source: UpstreamError) -> Self {
        match source {
            UpstreamError::MissingApiKey => Self::NotConfigured(provider),
            source => Self::Upstream { provider, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream {
                source: UpstreamError::Timeout,
                ..
            } => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ScoutError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::InvalidInput(_) => warn!(error = %self, "Rejected request"),
            _ => error!(error = %self, "Request failed"),
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
