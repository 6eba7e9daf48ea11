use url::Url;

/// A fetched HTML page, decoded to UTF-8.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// Where the request ended up after redirects.
    pub url_final: Url,
    pub body_utf8: String,
    /// WHATWG name of the encoding the body was decoded from.
    pub charset: &'static str,
}

impl PageResponse {
    /// Build a response around an already decoded HTML document.
    pub fn from_html(url: Url, html: impl Into<String>) -> Self {
        Self {
            url_final: url,
            body_utf8: html.into(),
            charset: encoding_rs::UTF_8.name(),
        }
    }

    /// Lowercased host of the final URL, without a `www.` prefix.
    pub fn host(&self) -> Option<String> {
        self.url_final.host_str().map(|host| {
            let host = host.to_ascii_lowercase();
            host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
        })
    }
}
