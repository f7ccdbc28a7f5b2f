use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use inquister::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Read once; the credential travels inside the config from here on
    let config = Config::load();
    let router = inquister::app(&config)?;

    let bind: SocketAddr = config.server.bind.parse().with_context(|| {
        format!(
            "Invalid INQUISTER_BIND '{}' (expected host:port)",
            config.server.bind
        )
    })?;
    let listener = TcpListener::bind(bind).await?;
    let gemini = match config.gemini.api_key {
        Some(_) => "configured",
        None => "missing",
    };
    tracing::info!(
        %bind,
        path = %config.server.ask_path,
        gemini,
        "Starting Inquister server"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
