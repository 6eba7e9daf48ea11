pub mod client;
pub mod keywords;
pub mod types;

pub use client::{KeywordExtractor, OpenRouterClient};
pub use keywords::{MAX_KEYWORDS, build_prompt, parse_keywords};
