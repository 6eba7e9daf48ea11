use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {0}")]
    Http(reqwest::StatusCode),

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("charset error: {0}")]
    Charset(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Whether the page itself refused us (auth walls, bot blocking, 404s),
    /// as opposed to a network-level failure.
    pub fn is_refusal(&self) -> bool {
        match self {
            Self::Http(status) => status.is_client_error() || status.as_u16() == 999,
            Self::UnsupportedContentType(_) => true,
            _ => false,
        }
    }

    /// Classify a reqwest failure. The URL is stripped from the message so
    /// query strings never reach logs.
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http(status)
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
