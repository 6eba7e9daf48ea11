use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::extractor::{
    PageProfile,
    generic::{headline_from_title, name_from_title, truncate_description},
};
use crate::search::SearchHit;

/// A person found on a professional network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    /// Display name of the person.
    #[schema(example = "John Smith")]
    pub name: String,
    /// Job title or headline, when one could be found.
    #[schema(example = "Software Engineer at Google")]
    pub title: Option<String>,
    /// Profile page the record was taken from.
    #[schema(example = "https://www.linkedin.com/in/johnsmith")]
    pub url: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, title: Option<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title,
            url: url.into(),
        }
    }
}

/// A search hit that points at a page which might be a profile. Name and
/// title are whatever the search result itself reveals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub name: Option<String>,
    pub title: Option<String>,
}

impl Candidate {
    pub fn from_hit(hit: &SearchHit) -> Option<Self> {
        let url = hit.link.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }

        let result_title = hit.title.as_deref().unwrap_or_default();
        let title = headline_from_title(result_title)
            .or_else(|| hit.snippet.as_deref().and_then(truncate_description));

        Some(Self {
            url: url.to_string(),
            name: name_from_title(result_title),
            title,
        })
    }

    /// Let values scraped from the page override the search-derived ones.
    pub fn enrich(self, page: PageProfile) -> Self {
        Self {
            url: self.url,
            name: page.name.or(self.name),
            title: page.title.or(self.title),
        }
    }

    /// A candidate becomes a profile only once it has a name.
    pub fn into_profile(self) -> Option<Profile> {
        let name = self.name?;
        Some(Profile {
            name,
            title: self.title,
            url: self.url,
        })
    }
}
