use serde::Serialize;
use std::sync::LazyLock;

use regex::Regex;

/// Name and headline scraped from a profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageProfile {
    pub name: Option<String>,
    pub title: Option<String>,
}

impl PageProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.title.is_none()
    }

    /// Fill fields that are still missing from `other`.
    pub fn or(self, other: PageProfile) -> PageProfile {
        PageProfile {
            name: self.name.or(other.name),
            title: self.title.or(other.title),
        }
    }
}

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run to one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Normalized, non-empty text or `None`.
pub fn clean_text(text: &str) -> Option<String> {
    let cleaned = normalize_whitespace(text);
    (!cleaned.is_empty()).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Jane \n\t  Doe  "), "Jane Doe");
    }

    #[test]
    fn test_clean_text_rejects_blank() {
        assert_eq!(clean_text(" \n "), None);
        assert_eq!(clean_text(" Jane "), Some("Jane".to_string()));
    }

    #[test]
    fn test_or_prefers_self() {
        let page = PageProfile {
            name: Some("Jane Doe".into()),
            title: None,
        };
        let merged = page.or(PageProfile {
            name: Some("J. Doe".into()),
            title: Some("Engineer".into()),
        });
        assert_eq!(merged.name.as_deref(), Some("Jane Doe"));
        assert_eq!(merged.title.as_deref(), Some("Engineer"));
    }
}
