use std::collections::HashSet;

/// Upper bound on keywords kept from one completion.
pub const MAX_KEYWORDS: usize = 10;

const IGNORED_ANSWERS: [&str; 4] = ["none", "n/a", "no keywords", "nothing"];

pub fn build_prompt(text: &str) -> String {
    format!(
        "Extract people-related search keywords from the following text. Focus on:\n\
         - Person names mentioned\n\
         - Job titles or roles\n\
         - Companies or organizations associated with people\n\
         - Professional skills or expertise areas mentioned with people\n\
         \n\
         Return only the most relevant search terms that would help find professional \
         profiles of people mentioned, separated by commas.\n\
         \n\
         Text: {}\n\
         \n\
         Keywords:",
        text.trim()
    )
}

/// Split a completion into search keywords.
///
/// Models are asked for a comma separated list but regularly answer with one
/// keyword per line, numbered bullets or quoted terms, so all of those are
/// accepted. Placeholder answers such as "None" yield no keywords.
pub fn parse_keywords(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    content
        .split([',', '\n', ';'])
        .map(clean_keyword)
        .filter(|keyword| keyword.chars().any(char::is_alphanumeric))
        .filter(|keyword| !IGNORED_ANSWERS.contains(&keyword.to_lowercase().as_str()))
        .filter(|keyword| seen.insert(keyword.to_lowercase()))
        .take(MAX_KEYWORDS)
        .collect()
}

fn clean_keyword(raw: &str) -> String {
    let keyword = raw.trim();
    let keyword = keyword.strip_prefix("Keywords:").unwrap_or(keyword).trim_start();

    strip_list_marker(keyword)
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
        .trim_end_matches('.')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip "1. ", "2) ", "- ", "* " or "• " list markers.
fn strip_list_marker(text: &str) -> &str {
    let rest = text.trim_start_matches(|c: char| c.is_ascii_digit());
    let marker_rest = if rest.len() < text.len() {
        rest.strip_prefix(['.', ')'])
    } else {
        text.strip_prefix(['-', '*', '•'])
    };

    match marker_rest {
        Some(after) if after.starts_with(char::is_whitespace) => after.trim_start(),
        _ => text,
    }
}
