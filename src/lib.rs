pub mod app_state;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod llm;
pub mod profiles;
pub mod routes;
pub mod search;
pub mod telemetry;
pub mod upstream;
