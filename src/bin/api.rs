use anyhow::{Context, Result};
use profile_scout::{app_state::AppState, config::Config, routes::router, telemetry};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the real environment wins either way.
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(config.log_format());
    info!(?config, "Loaded configuration");

    if config.openrouter_api_key().is_none() {
        warn!("OPENROUTER_API_KEY is not set; /profiles will fail until it is");
    }
    if config.serpapi_api_key().is_none() {
        warn!("SERPAPI_API_KEY is not set; /profiles will fail until it is");
    }

    let state = AppState::from_config(&config).context("Failed to build application state")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr()))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Received shutdown signal, initiating graceful shutdown...");
}
