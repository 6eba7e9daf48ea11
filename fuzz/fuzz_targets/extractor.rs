#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use profile_scout::extractor::extract_profile;
use profile_scout::fetcher::PageResponse;

const HOSTS: [&str; 3] = [
    "https://www.linkedin.com/in/fuzz",
    "https://github.com/fuzz",
    "https://fuzz.example.com/about",
];

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data).to_string();

    for host in HOSTS {
        let Ok(url) = Url::parse(host) else { continue };
        let page = PageResponse::from_html(url, html.clone());

        // Any scraped field must survive whitespace cleanup.
        if let Some(profile) = extract_profile(&page) {
            if let Some(name) = profile.name {
                assert!(!name.trim().is_empty());
            }
        }
    }
});
