use std::path::PathBuf;

use account_service::config::Configuration;
use account_service::{app, initialize_state, telemetry};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const OTLP_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
const CONFIG_PATH: &str = "CONFIG_PATH";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let endpoint = std::env::var(OTLP_ENDPOINT).ok();

    // Export logs using OTLP only when an endpoint is set.
    let logs = endpoint
        .as_deref()
        .map(telemetry::setup_logging)
        .transpose()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,h2=off,tonic=off,hyper=off,tower=off")
        }))
        .with(tracing_subscriber::fmt::layer())
        .with(logs)
        .init();

    let tracer = endpoint
        .as_deref()
        .map(telemetry::setup_tracer)
        .transpose()?;

    let config = Configuration::default()
        .path(std::env::var(CONFIG_PATH).map(PathBuf::from).unwrap_or_default())
        .read()?;
    let port = config.port();

    let state = initialize_state(config).await?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(%port, "server started");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer {
        if let Err(err) = provider.shutdown() {
            tracing::warn!(error = ?err, "failed to flush spans");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
