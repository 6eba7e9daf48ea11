use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extractor::model::{PageProfile, clean_text};
use crate::upstream::truncate_chars;

/// Longest headline taken from a meta description.
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// A `<title>` with at most this many words is taken to be just a name.
const MAX_BARE_NAME_WORDS: usize = 4;

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[property='og:title']").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta[name='description'], meta[property='og:description']").unwrap()
});

/// Markup-agnostic fallback: name from the document title, headline from
/// the meta description.
pub fn scrape(document: &Html) -> PageProfile {
    PageProfile {
        name: document_title(document).and_then(|title| name_from_title(&title)),
        title: description(document),
    }
}

/// Pull a person's name out of a page or search-result title such as
/// "Jane Doe - Staff Engineer - Acme | LinkedIn" or "Jane Doe | Medium".
pub fn name_from_title(title: &str) -> Option<String> {
    let title = clean_text(title)?;

    if let Some((name, _)) = title.split_once(" - ") {
        return clean_text(name);
    }
    if let Some((name, _)) = title.split_once(" | ") {
        return clean_text(name);
    }
    if title.split_whitespace().count() <= MAX_BARE_NAME_WORDS {
        return Some(title);
    }
    None
}

/// Headline part of a "Name - Headline | Site" title, if there is one.
pub fn headline_from_title(title: &str) -> Option<String> {
    let title = clean_text(title)?;
    let without_site = match title.rsplit_once(" | ") {
        Some((rest, _)) => rest,
        None => title.as_str(),
    };
    let (_, headline) = without_site.split_once(" - ")?;
    clean_text(headline)
}

pub fn truncate_description(text: &str) -> Option<String> {
    clean_text(&truncate_chars(&clean_text(text)?, MAX_DESCRIPTION_CHARS))
}

fn document_title(document: &Html) -> Option<String> {
    document
        .select(&OG_TITLE)
        .find_map(|element| element.value().attr("content").and_then(clean_text))
        .or_else(|| {
            document
                .select(&TITLE)
                .find_map(|element| clean_text(&element.text().collect::<String>()))
        })
}

fn description(document: &Html) -> Option<String> {
    document
        .select(&DESCRIPTION)
        .find_map(|element| element.value().attr("content").and_then(truncate_description))
}
