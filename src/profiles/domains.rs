use url::Url;

/// Professional networks whose pages count as profiles.
pub const PROFILE_DOMAINS: [&str; 12] = [
    "linkedin.com",
    "crunchbase.com",
    "github.com",
    "twitter.com",
    "medium.com",
    "about.me",
    "xing.com",
    "angel.co",
    "wellfound.com",
    "dribbble.com",
    "behance.net",
    "stackoverflow.com",
];

/// Host of an http(s) URL, lowercased and without a leading `www.`.
pub fn profile_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(match host.strip_prefix("www.") {
        Some(bare) => bare.to_string(),
        None => host,
    })
}

/// Whether the URL points at one of [`PROFILE_DOMAINS`] or a subdomain of one.
/// Malformed and non-http(s) URLs never match.
pub fn is_profile_domain(url: &str) -> bool {
    let Some(host) = profile_host(url) else {
        return false;
    };

    PROFILE_DOMAINS.iter().any(|domain| {
        host == *domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
