use anyhow::Context;
use news_picker::app::{create_app, init_tracing};
use news_picker::config::{Config, DEFAULT_LOG_FILTER};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_tracing(DEFAULT_LOG_FILTER);

    if let Err(e) = run().await {
        error!("news picker stopped: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    info!(?config, "Starting news picker");

    let app = create_app(&config)?;
    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address()))?;

    info!(
        "Listening on {} (GET /healthz, GET /?text=, GET|POST /slack, POST /)",
        config.server_url()
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
