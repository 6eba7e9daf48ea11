//! Site-specific scrapers for the profile networks whose markup is known.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extractor::model::{PageProfile, clean_text};

static LINKEDIN_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1.text-heading-xlarge, h1.break-words").unwrap());
static LINKEDIN_HEADLINE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.text-body-medium, div.break-words").unwrap());

static GITHUB_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.p-name").unwrap());
static GITHUB_BIO: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.p-note").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    LinkedIn,
    GitHub,
    Other,
}

impl Site {
    pub fn from_host(host: &str) -> Self {
        if host == "linkedin.com" || host.ends_with(".linkedin.com") {
            Site::LinkedIn
        } else if host == "github.com" {
            Site::GitHub
        } else {
            Site::Other
        }
    }
}

pub fn scrape(site: Site, document: &Html) -> PageProfile {
    match site {
        Site::LinkedIn => PageProfile {
            name: first_text(document, &LINKEDIN_NAME),
            title: first_text(document, &LINKEDIN_HEADLINE),
        },
        Site::GitHub => PageProfile {
            name: first_text(document, &GITHUB_NAME),
            title: first_text(document, &GITHUB_BIO),
        },
        Site::Other => PageProfile::default(),
    }
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .find_map(|element| clean_text(&element.text().collect::<String>()))
}
