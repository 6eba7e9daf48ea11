#![allow(dead_code)]

use axum::Router;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use wiremock::MockServer;

use profile_scout::{app_state::AppState, config::Config, routes::router};

pub const OPENROUTER_KEY: &str = "test-openrouter-key";
pub const SERPAPI_KEY: &str = "test-serpapi-key";

/// Config pointing both providers at `server`, with page fetching off.
pub fn test_config(server: &MockServer) -> Config {
    Config::default()
        .with_openrouter_base_url(format!("{}/api/v1", server.uri()))
        .with_serpapi_base_url(server.uri())
        .with_api_keys(Some(OPENROUTER_KEY), Some(SERPAPI_KEY))
        .with_fetch_profile_pages(false)
}

pub fn test_app(config: &Config) -> Router {
    let state = AppState::from_config(config).expect("Failed to build app state");
    router(state)
}

/// An OpenRouter chat-completions body whose answer is `content`.
pub fn completion(content: &str) -> Value {
    json!({
        "id": "gen-123",
        "model": "anthropic/claude-3-haiku",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": content}
        }]
    })
}

/// A SerpAPI body with one organic result per `(title, link)`.
pub fn serp_results(results: &[(&str, &str)]) -> Value {
    let organic: Vec<Value> = results
        .iter()
        .enumerate()
        .map(|(i, (title, link))| {
            json!({
                "position": i + 1,
                "title": title,
                "link": link,
                "snippet": format!("{} snippet", title)
            })
        })
        .collect();
    json!({
        "search_metadata": {"status": "Success"},
        "organic_results": organic
    })
}

/// Base URL of a server that answers every request with JSON headers and the
/// first byte of the body, then goes quiet.
pub async fn stalled_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{",
                    )
                    .await;
                let _ = socket.flush().await;
                tokio::time::sleep(Duration::from_secs(10)).await;
            });
        }
    });

    format!("http://{}", addr)
}
