//! Configuration handling for the service.
//!
//! Everything is read from environment variables (optionally seeded from a
//! `.env` file by the binary). API keys are optional at load time so the
//! service can still start and report its state on `/health`; a missing key
//! surfaces as an error on the first call that needs it.

use std::env;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::net::SocketAddr;

/// Environment variable names.
pub const ENV_OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_SERPAPI_API_KEY: &str = "SERPAPI_API_KEY";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_OPENROUTER_BASE_URL: &str = "OPENROUTER_BASE_URL";
pub const ENV_OPENROUTER_MODEL: &str = "OPENROUTER_MODEL";
pub const ENV_SERPAPI_BASE_URL: &str = "SERPAPI_BASE_URL";
pub const ENV_SERPAPI_ENGINE: &str = "SERPAPI_ENGINE";
pub const ENV_FETCH_PROFILE_PAGES: &str = "FETCH_PROFILE_PAGES";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_OPENROUTER_MODEL: &str = "anthropic/claude-3-haiku";
const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";
const DEFAULT_SERPAPI_ENGINE: &str = "bing";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Application runtime configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    openrouter_api_key: Option<String>,
    serpapi_api_key: Option<String>,
    bind_addr: SocketAddr,
    openrouter_base_url: String,
    openrouter_model: String,
    serpapi_base_url: String,
    serpapi_engine: String,
    fetch_profile_pages: bool,
    log_format: LogFormat,
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env_or(ENV_BIND_ADDR, DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                field: ENV_BIND_ADDR,
                reason: e.to_string(),
            })?;

        let fetch_profile_pages = match env::var(ENV_FETCH_PROFILE_PAGES) {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                field: ENV_FETCH_PROFILE_PAGES,
                reason: format!("expected a boolean, got '{}'", raw),
            })?,
            Err(_) => true,
        };

        let log_format = match env::var(ENV_LOG_FORMAT)
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Ok("") | Err(_) => LogFormat::Pretty,
            Ok(other) => {
                return Err(ConfigError::InvalidValue {
                    field: ENV_LOG_FORMAT,
                    reason: format!("expected 'pretty' or 'json', got '{}'", other),
                });
            }
        };

        Ok(Self {
            openrouter_api_key: non_empty_env(ENV_OPENROUTER_API_KEY),
            serpapi_api_key: non_empty_env(ENV_SERPAPI_API_KEY),
            bind_addr,
            openrouter_base_url: env_or(ENV_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_BASE_URL),
            openrouter_model: env_or(ENV_OPENROUTER_MODEL, DEFAULT_OPENROUTER_MODEL),
            serpapi_base_url: env_or(ENV_SERPAPI_BASE_URL, DEFAULT_SERPAPI_BASE_URL),
            serpapi_engine: env_or(ENV_SERPAPI_ENGINE, DEFAULT_SERPAPI_ENGINE),
            fetch_profile_pages,
            log_format,
        })
    }

    pub fn openrouter_api_key(&self) -> Option<&str> {
        self.openrouter_api_key.as_deref()
    }
    pub fn serpapi_api_key(&self) -> Option<&str> {
        self.serpapi_api_key.as_deref()
    }
    /// TCP bind address for the HTTP server.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
    pub fn openrouter_base_url(&self) -> &str {
        &self.openrouter_base_url
    }
    pub fn openrouter_model(&self) -> &str {
        &self.openrouter_model
    }
    pub fn serpapi_base_url(&self) -> &str {
        &self.serpapi_base_url
    }
    pub fn serpapi_engine(&self) -> &str {
        &self.serpapi_engine
    }
    /// Whether candidate profile pages are fetched and scraped.
    pub fn fetch_profile_pages(&self) -> bool {
        self.fetch_profile_pages
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    pub fn with_openrouter_base_url(mut self, url: impl Into<String>) -> Self {
        self.openrouter_base_url = url.into();
        self
    }
    pub fn with_serpapi_base_url(mut self, url: impl Into<String>) -> Self {
        self.serpapi_base_url = url.into();
        self
    }
    pub fn with_api_keys(
        mut self,
        openrouter: Option<impl Into<String>>,
        serpapi: Option<impl Into<String>>,
    ) -> Self {
        self.openrouter_api_key = openrouter.map(Into::into);
        self.serpapi_api_key = serpapi.map(Into::into);
        self
    }
    pub fn with_fetch_profile_pages(mut self, enabled: bool) -> Self {
        self.fetch_profile_pages = enabled;
        self
    }

    /// Defaults with no API keys (mirrors `from_env` with an empty environment).
    pub fn default() -> Self {
        Self {
            openrouter_api_key: None,
            serpapi_api_key: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            serpapi_base_url: DEFAULT_SERPAPI_BASE_URL.to_string(),
            serpapi_engine: DEFAULT_SERPAPI_ENGINE.to_string(),
            fetch_profile_pages: true,
            log_format: LogFormat::Pretty,
        }
    }
}

// Keys never go to the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openrouter_api_key", &redact(&self.openrouter_api_key))
            .field("serpapi_api_key", &redact(&self.serpapi_api_key))
            .field("bind_addr", &self.bind_addr)
            .field("openrouter_base_url", &self.openrouter_base_url)
            .field("openrouter_model", &self.openrouter_model)
            .field("serpapi_base_url", &self.serpapi_base_url)
            .field("serpapi_engine", &self.serpapi_engine)
            .field("fetch_profile_pages", &self.fetch_profile_pages)
            .field("log_format", &self.log_format)
            .finish()
    }
}

fn redact(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<set>",
        None => "<unset>",
    }
}

fn env_or(key: &str, default: &str) -> String {
    non_empty_env(key).unwrap_or_else(|| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
