use clap::Parser;
use doc_intelligence_frontend::cli::Cli;
use doc_intelligence_frontend::config::get_configuration;
use doc_intelligence_frontend::services::backend_client::BackendClient;
use doc_intelligence_frontend::startup::build_router;
use doc_intelligence_frontend::AppState;
use dotenvy::dotenv;
use service_core::observability::init_tracing;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let configuration = get_configuration(&cli).map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "doc-intelligence-frontend",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    )?;

    doc_intelligence_frontend::services::metrics::init_metrics()
        .map_err(|e| anyhow::anyhow!("Failed to register metrics: {}", e))?;

    let backend = Arc::new(BackendClient::new(configuration.backend.clone())?);
    let state = AppState::new(backend, configuration.server.max_request_bytes);

    let app = build_router(state);

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!(
        address = %address,
        backend = %configuration.backend.base_url,
        "Starting doc-intelligence-frontend"
    );
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
