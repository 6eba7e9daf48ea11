use std::fs;
use url::Url;

use crate::extractor::extract_profile;
use crate::extractor::generic::MAX_DESCRIPTION_CHARS;
use crate::fetcher::types::PageResponse;

fn fixture_page(name: &str, url: &str) -> PageResponse {
    let html = fs::read_to_string(format!("src/extractor/tests/fixtures/{}", name))
        .expect("Failed to read test fixture");
    PageResponse::from_html(Url::parse(url).unwrap(), html)
}

#[test]
fn test_extract_linkedin_profile() {
    let page = fixture_page("linkedin.html", "https://www.linkedin.com/in/johnsmith");
    let profile = extract_profile(&page).unwrap();

    assert_eq!(profile.name.as_deref(), Some("John Smith"));
    assert_eq!(
        profile.title.as_deref(),
        Some("Software Engineer at Google")
    );
}

#[test]
fn test_extract_github_profile() {
    let page = fixture_page("github.html", "https://github.com/octocat");
    let profile = extract_profile(&page).unwrap();

    // The <title> is too noisy to be a name; the vcard markup is used instead.
    assert_eq!(profile.name.as_deref(), Some("The Octocat"));
    assert_eq!(profile.title.as_deref(), Some("GitHub mascot"));
}

#[test]
fn test_extract_generic_profile_from_title_and_description() {
    let page = fixture_page("personal.html", "https://about.me/sarahjohnson");
    let profile = extract_profile(&page).unwrap();

    assert_eq!(profile.name.as_deref(), Some("Sarah Johnson"));
    let title = profile.title.unwrap();
    assert!(title.starts_with("Senior data scientist at Microsoft."));
    assert!(title.chars().count() <= MAX_DESCRIPTION_CHARS);
}

#[test]
fn test_linkedin_markup_ignored_on_other_hosts() {
    // Same markup served from a host we have no scraper for falls back to
    // the document title.
    let page = fixture_page("linkedin.html", "https://medium.com/@johnsmith");
    let profile = extract_profile(&page).unwrap();

    assert_eq!(profile.name.as_deref(), Some("John Smith"));
    assert!(profile.title.unwrap().starts_with("Experience: Google"));
}

#[test]
fn test_blank_page_yields_nothing() {
    let page = fixture_page("blank.html", "https://github.com/ghost");
    assert!(extract_profile(&page).is_none());
}

#[test]
fn test_garbage_input_does_not_panic() {
    let page = PageResponse::from_html(
        Url::parse("https://linkedin.com/in/x").unwrap(),
        "<h1 class=\"text-heading-xlarge\"><<<>>></h1><title>",
    );
    let _ = extract_profile(&page);
}
