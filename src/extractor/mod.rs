pub mod generic;
pub mod model;
pub mod sites;

#[cfg(test)]
mod tests;

pub use model::PageProfile;

use scraper::Html;

use crate::fetcher::types::PageResponse;
use sites::Site;

/// Scrape a person's name and headline from a fetched profile page.
///
/// Site-specific markup wins; anything it misses is filled from the
/// document title and meta description.
pub fn extract_profile(page: &PageResponse) -> Option<PageProfile> {
    let document = Html::parse_document(&page.body_utf8);
    let site = page
        .host()
        .map(|host| Site::from_host(&host))
        .unwrap_or(Site::Other);

    let profile = sites::scrape(site, &document).or(generic::scrape(&document));

    (!profile.is_empty()).then_some(profile)
}
