//! Collapsing of profile records that refer to the same person or page.
//!
//! Two records are duplicates when their normalized names are equal or their
//! normalized URLs are equal. The first record seen wins and input order is
//! kept, so running [`deduplicate`] on its own output is a no-op.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

use crate::profiles::{domains::is_profile_domain, model::Profile};

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Lowercase, drop punctuation, collapse whitespace.
pub fn normalize_name(name: &str) -> String {
    NON_WORD
        .replace_all(&name.to_lowercase(), "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, drop scheme, `www.`, fragment and trailing slashes. `None`
/// for anything that is not an absolute URL with a host.
pub fn normalize_url(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url.trim()).ok()?;
    parsed.set_fragment(None);

    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let mut normalized = String::with_capacity(url.len());
    normalized.push_str(host);
    if let Some(port) = parsed.port() {
        normalized.push(':');
        normalized.push_str(&port.to_string());
    }
    normalized.push_str(parsed.path().trim_end_matches('/'));
    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        normalized.push('?');
        normalized.push_str(query);
    }

    Some(normalized.to_lowercase())
}

/// Keep allow-listed profiles only, then drop every record whose name or URL
/// was already taken by an earlier one.
pub fn deduplicate(profiles: Vec<Profile>) -> Vec<Profile> {
    let mut seen_names = HashSet::new();
    let mut seen_urls = HashSet::new();

    profiles
        .into_iter()
        .filter(|profile| is_profile_domain(&profile.url))
        .filter_map(|profile| {
            let url_key = normalize_url(&profile.url)?;
            let name_key = normalize_name(&profile.name);

            let name_taken = !name_key.is_empty() && seen_names.contains(&name_key);
            if name_taken || seen_urls.contains(&url_key) {
                return None;
            }

            if !name_key.is_empty() {
                seen_names.insert(name_key);
            }
            seen_urls.insert(url_key);
            Some(profile)
        })
        .collect()
}
