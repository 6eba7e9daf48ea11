use crate::fetcher::{errors::FetchError, types::PageResponse};
use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// How much of the body is scanned for an in-document charset declaration.
const SNIFF_LEN: usize = 4096;

static HEADER_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap(),
        Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap(),
    ]
});

pub fn process_response(
    url_final: Url,
    body_bytes: Bytes,
    content_type: &str,
) -> Result<PageResponse, FetchError> {
    let encoding = detect_encoding(content_type, &body_bytes);
    let body_utf8 = decode(&body_bytes, encoding)?;

    Ok(PageResponse {
        url_final,
        body_utf8,
        charset: encoding.name(),
    })
}

/// Header charset first, then `<meta>` declarations, then a statistical guess.
fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_from(&HEADER_CHARSET, content_type) {
        return encoding;
    }

    let head = &body[..body.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);
    if let Some(encoding) = META_CHARSET
        .iter()
        .find_map(|regex| label_from(regex, &head_str))
    {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, body.len() <= SNIFF_LEN);
    detector.guess(None, true)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_ascii_lowercase();
    Encoding::for_label(label.as_bytes())
}

fn decode(body: &[u8], encoding: &'static Encoding) -> Result<String, FetchError> {
    let (decoded, _, had_errors) = encoding.decode(body);

    // Profile pages with a stray bad byte are still worth scraping; only a
    // body that decodes to nothing but replacement characters is rejected.
    if had_errors && !body.is_empty() && decoded.chars().all(|c| c == '\u{FFFD}') {
        return Err(FetchError::Charset(format!(
            "failed to decode content as {}",
            encoding.name()
        )));
    }

    Ok(decoded.into_owned())
}
