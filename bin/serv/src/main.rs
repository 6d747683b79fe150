use anyhow::Context;
use vocab_api::{ApiConfig, ApiState, metrics, router, tracing::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    init_tracing(&config.env);

    let metrics_handle = if config.metrics_enabled {
        Some(metrics::init_metrics().context("failed to install metrics recorder")?)
    } else {
        None
    };

    // Initialize the application state
    let state = ApiState::new(&config).await?;

    let app = router::app(state, &config, metrics_handle);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
