use futures::future::{join_all, try_join_all};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::ScoutError;
use crate::extractor::extract_profile;
use crate::fetcher::PageFetch;
use crate::llm::KeywordExtractor;
use crate::profiles::{
    dedup::{deduplicate, normalize_url},
    domains::is_profile_domain,
    model::{Candidate, Profile},
};
use crate::search::{SearchHit, WebSearch, profile_query};
use crate::upstream::Provider;

/// Per-request fan-out limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoutLimits {
    /// Keywords that get a search of their own.
    pub searched_keywords: usize,
    /// Candidate pages considered after domain filtering.
    pub candidates: usize,
}

impl Default for ScoutLimits {
    fn default() -> Self {
        Self {
            searched_keywords: 5,
            candidates: 20,
        }
    }
}

/// Finds profiles of the people mentioned in a piece of text.
#[derive(Clone)]
pub struct ProfileScout {
    keywords: Arc<dyn KeywordExtractor>,
    search: Arc<dyn WebSearch>,
    pages: Option<Arc<dyn PageFetch>>,
    limits: ScoutLimits,
}

impl ProfileScout {
    pub fn new(keywords: Arc<dyn KeywordExtractor>, search: Arc<dyn WebSearch>) -> Self {
        Self {
            keywords,
            search,
            pages: None,
            limits: ScoutLimits::default(),
        }
    }

    /// Scrape each candidate's page to improve its name and title.
    pub fn with_page_fetcher(mut self, pages: Arc<dyn PageFetch>) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn with_limits(mut self, limits: ScoutLimits) -> Self {
        self.limits = limits;
        self
    }

    #[instrument(skip_all, fields(text_len = text.len()))]
    pub async fn find_profiles(&self, text: &str) -> Result<Vec<Profile>, ScoutError> {
        if text.trim().is_empty() {
            debug!("Blank text, nothing to look up");
            return Ok(Vec::new());
        }

        let keywords = self
            .keywords
            .extract_keywords(text)
            .await
            .map_err(|e| ScoutError::upstream(Provider::OpenRouter, e))?;

        if keywords.is_empty() {
            info!("No people-related keywords in text");
            return Ok(Vec::new());
        }

        let hits = self.search_keywords(&keywords).await?;
        let candidates = self.select_candidates(&hits);
        info!(
            keywords = keywords.len(),
            hits = hits.len(),
            candidates = candidates.len(),
            "Collected profile candidates"
        );

        let candidates = match &self.pages {
            Some(pages) => enrich_all(pages.as_ref(), candidates).await,
            None => candidates,
        };

        let profiles = deduplicate(
            candidates
                .into_iter()
                .filter_map(Candidate::into_profile)
                .collect(),
        );
        info!(profiles = profiles.len(), "Profiles found");

        Ok(profiles)
    }

    /// Search the leading keywords concurrently; hits keep keyword order.
    async fn search_keywords(&self, keywords: &[String]) -> Result<Vec<SearchHit>, ScoutError> {
        let searches = keywords
            .iter()
            .take(self.limits.searched_keywords)
            .map(|keyword| {
                let query = profile_query(keyword);
                async move { self.search.search(&query).await }
            });

        let pages = try_join_all(searches)
            .await
            .map_err(|e| ScoutError::upstream(Provider::SerpApi, e))?;

        Ok(pages.into_iter().flatten().collect())
    }

    /// Profile-domain hits, one per URL, up to the candidate limit.
    fn select_candidates(&self, hits: &[SearchHit]) -> Vec<Candidate> {
        let mut seen_urls = HashSet::new();

        hits.iter()
            .filter_map(Candidate::from_hit)
            .filter(|candidate| is_profile_domain(&candidate.url))
            .filter(|candidate| match normalize_url(&candidate.url) {
                Some(key) => seen_urls.insert(key),
                None => false,
            })
            .take(self.limits.candidates)
            .collect()
    }
}

async fn enrich_all(pages: &dyn PageFetch, candidates: Vec<Candidate>) -> Vec<Candidate> {
    join_all(
        candidates
            .into_iter()
            .map(|candidate| enrich(pages, candidate)),
    )
    .await
}

/// Page refusals are expected (login walls, bot blocking) and only cost us
/// the scraped values. A fetch that was redirected to a different page (for
/// example LinkedIn's `/authwall`) describes that page, not the person.
async fn enrich(pages: &dyn PageFetch, candidate: Candidate) -> Candidate {
    let Ok(url) = Url::parse(&candidate.url) else {
        return candidate;
    };

    let page = match pages.fetch(&url).await {
        Ok(page) => page,
        Err(err) if err.is_refusal() => {
            debug!(url = %candidate.url, error = %err, "Profile page refused");
            return candidate;
        }
        Err(err) => {
            warn!(url = %candidate.url, error = %err, "Profile page fetch failed");
            return candidate;
        }
    };

    if normalize_url(page.url_final.as_str()) != normalize_url(&candidate.url) {
        debug!(
            url = %candidate.url,
            url_final = %page.url_final,
            "Profile page redirected elsewhere, keeping search values"
        );
        return candidate;
    }

    match extract_profile(&page) {
        Some(scraped) => candidate.enrich(scraped),
        None => {
            debug!(url = %candidate.url, "Nothing scraped from profile page");
            candidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{FetchError, PageResponse, client::MockPageFetch};
    use crate::llm::client::MockKeywordExtractor;
    use crate::search::client::MockWebSearch;
    use crate::upstream::UpstreamError;
    use mockall::predicate::eq;
    use reqwest::StatusCode;

    fn hit(title: &str, link: &str) -> SearchHit {
        SearchHit {
            title: Some(title.to_string()),
            link: Some(link.to_string()),
            snippet: None,
        }
    }

    fn keywords_returning(keywords: &'static [&'static str]) -> MockKeywordExtractor {
        let mut mock = MockKeywordExtractor::new();
        mock.expect_extract_keywords()
            .returning(move |_| Ok(keywords.iter().map(|k| k.to_string()).collect()));
        mock
    }

    #[tokio::test]
    async fn test_blank_text_makes_no_calls() {
        let mut keywords = MockKeywordExtractor::new();
        keywords.expect_extract_keywords().never();
        let mut search = MockWebSearch::new();
        search.expect_search().never();

        let scout = ProfileScout::new(Arc::new(keywords), Arc::new(search));
        assert!(scout.find_profiles("   \n").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_keywords_yields_no_profiles() {
        let mut search = MockWebSearch::new();
        search.expect_search().never();

        let scout = ProfileScout::new(Arc::new(keywords_returning(&[])), Arc::new(search));
        let profiles = scout.find_profiles("The weather was lovely today.").await.unwrap();
        assert!(profiles.is_empty());
    }

    #[tokio::test]
    async fn test_filters_and_deduplicates_search_hits() {
        let mut search = MockWebSearch::new();
        search
            .expect_search()
            .with(eq("John Smith profile OR linkedin OR github".to_string()))
            .returning(|_| {
                Ok(vec![
                    hit(
                        "John Smith - Software Engineer - Google | LinkedIn",
                        "https://www.linkedin.com/in/johnsmith",
                    ),
                    hit("John Smith's blog", "https://johnsmith.dev"),
                    hit("John Smith | GitHub", "https://github.com/jsmith"),
                ])
            });
        search
            .expect_search()
            .with(eq("Google profile OR linkedin OR github".to_string()))
            .returning(|_| {
                Ok(vec![hit(
                    "John Smith - Google | LinkedIn",
                    "http://linkedin.com/in/johnsmith/",
                )])
            });

        let scout = ProfileScout::new(
            Arc::new(keywords_returning(&["John Smith", "Google"])),
            Arc::new(search),
        );
        let profiles = scout
            .find_profiles("John Smith is a software engineer at Google")
            .await
            .unwrap();

        assert_eq!(
            profiles,
            vec![Profile::new(
                "John Smith",
                Some("Software Engineer - Google".to_string()),
                "https://www.linkedin.com/in/johnsmith",
            )]
        );
    }

    #[tokio::test]
    async fn test_only_leading_keywords_are_searched() {
        let mut search = MockWebSearch::new();
        search.expect_search().times(2).returning(|_| Ok(Vec::new()));

        let scout = ProfileScout::new(
            Arc::new(keywords_returning(&["a", "b", "c", "d"])),
            Arc::new(search),
        )
        .with_limits(ScoutLimits {
            searched_keywords: 2,
            candidates: 20,
        });

        assert!(scout.find_profiles("a b c d").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_candidates_are_capped() {
        let mut search = MockWebSearch::new();
        search.expect_search().returning(|_| {
            Ok((0..10)
                .map(|i| hit(&format!("Person {} | GitHub", i), &format!("https://github.com/p{}", i)))
                .collect())
        });

        let scout = ProfileScout::new(Arc::new(keywords_returning(&["people"])), Arc::new(search))
            .with_limits(ScoutLimits {
                searched_keywords: 5,
                candidates: 3,
            });

        let profiles = scout.find_profiles("some people").await.unwrap();
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0].name, "Person 0");
    }

    #[tokio::test]
    async fn test_page_values_override_search_values() {
        let mut search = MockWebSearch::new();
        search.expect_search().returning(|_| {
            Ok(vec![
                hit("octocat | GitHub", "https://github.com/octocat"),
                hit("Jane Doe - Writer | Medium", "https://medium.com/@jane"),
            ])
        });

        let mut pages = MockPageFetch::new();
        pages
            .expect_fetch()
            .withf(|url| url.as_str() == "https://github.com/octocat")
            .returning(|url| {
                Ok(PageResponse::from_html(
                    url.clone(),
                    r#"<span class="p-name">The Octocat</span><div class="p-note">Mascot</div>"#,
                ))
            });
        pages
            .expect_fetch()
            .withf(|url| url.as_str() == "https://medium.com/@jane")
            .returning(|_| Err(FetchError::Http(StatusCode::FORBIDDEN)));

        let scout = ProfileScout::new(Arc::new(keywords_returning(&["octocat"])), Arc::new(search))
            .with_page_fetcher(Arc::new(pages));

        let profiles = scout.find_profiles("octocat and Jane").await.unwrap();
        assert_eq!(
            profiles,
            vec![
                Profile::new(
                    "The Octocat",
                    Some("Mascot".to_string()),
                    "https://github.com/octocat"
                ),
                Profile::new("Jane Doe", Some("Writer".to_string()), "https://medium.com/@jane"),
            ]
        );
    }

    #[tokio::test]
    async fn test_redirected_pages_do_not_rename_candidates() {
        let mut search = MockWebSearch::new();
        search.expect_search().returning(|_| {
            Ok(vec![
                hit("John Smith - Engineer | LinkedIn", "https://www.linkedin.com/in/johnsmith"),
                hit("Jane Doe - Designer | LinkedIn", "https://www.linkedin.com/in/janedoe"),
            ])
        });

        let mut pages = MockPageFetch::new();
        pages.expect_fetch().times(2).returning(|_| {
            Ok(PageResponse::from_html(
                Url::parse("https://www.linkedin.com/authwall?trk=public_profile").unwrap(),
                "<html><head><title>Sign Up | LinkedIn</title></head></html>",
            ))
        });

        let scout = ProfileScout::new(Arc::new(keywords_returning(&["engineers"])), Arc::new(search))
            .with_page_fetcher(Arc::new(pages));

        let profiles = scout.find_profiles("John and Jane").await.unwrap();
        assert_eq!(
            profiles,
            vec![
                Profile::new(
                    "John Smith",
                    Some("Engineer".to_string()),
                    "https://www.linkedin.com/in/johnsmith"
                ),
                Profile::new(
                    "Jane Doe",
                    Some("Designer".to_string()),
                    "https://www.linkedin.com/in/janedoe"
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_equivalent_final_url_still_enriches() {
        let mut search = MockWebSearch::new();
        search
            .expect_search()
            .returning(|_| Ok(vec![hit("octocat | GitHub", "http://github.com/octocat")]));

        let mut pages = MockPageFetch::new();
        pages.expect_fetch().returning(|_| {
            Ok(PageResponse::from_html(
                Url::parse("https://github.com/octocat/").unwrap(),
                r#"<span class="p-name">The Octocat</span>"#,
            ))
        });

        let scout = ProfileScout::new(Arc::new(keywords_returning(&["octocat"])), Arc::new(search))
            .with_page_fetcher(Arc::new(pages));

        let profiles = scout.find_profiles("octocat").await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "The Octocat");
    }

    #[tokio::test]
    async fn test_network_failure_keeps_search_values() {
        let mut search = MockWebSearch::new();
        search
            .expect_search()
            .returning(|_| Ok(vec![hit("Jane Doe - Writer | Medium", "https://medium.com/@jane")]));

        let mut pages = MockPageFetch::new();
        pages
            .expect_fetch()
            .returning(|_| Err(FetchError::Connect("connection refused".to_string())));

        let scout = ProfileScout::new(Arc::new(keywords_returning(&["Jane"])), Arc::new(search))
            .with_page_fetcher(Arc::new(pages));

        let profiles = scout.find_profiles("Jane Doe writes").await.unwrap();
        assert_eq!(
            profiles,
            vec![Profile::new("Jane Doe", Some("Writer".to_string()), "https://medium.com/@jane")]
        );
    }

    #[tokio::test]
    async fn test_keyword_failure_propagates() {
        let mut keywords = MockKeywordExtractor::new();
        keywords
            .expect_extract_keywords()
            .returning(|_| Err(UpstreamError::MissingApiKey));
        let search = MockWebSearch::new();

        let scout = ProfileScout::new(Arc::new(keywords), Arc::new(search));
        let err = scout.find_profiles("John Smith").await.unwrap_err();
        assert!(matches!(err, ScoutError::NotConfigured(Provider::OpenRouter)));
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let mut search = MockWebSearch::new();
        search.expect_search().returning(|_| {
            Err(UpstreamError::Http {
                status: StatusCode::TOO_MANY_REQUESTS,
                body: String::new(),
            })
        });

        let scout = ProfileScout::new(Arc::new(keywords_returning(&["John Smith"])), Arc::new(search));
        let err = scout.find_profiles("John Smith").await.unwrap_err();
        assert!(matches!(
            err,
            ScoutError::Upstream {
                provider: Provider::SerpApi,
                ..
            }
        ));
    }
}
