pub mod client;
pub mod types;

pub use client::{SerpApiClient, WebSearch, profile_query};
pub use types::SearchHit;
