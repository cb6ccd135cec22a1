use anyhow::Context;
use tracing_subscriber::EnvFilter;

use task_manager_api::{
    app,
    config::{self, StoreBackend},
    database::DatabaseManager,
    is_production, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.api.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting task manager API in {:?} mode", config.environment);
    if is_production!() && config.store.backend == StoreBackend::Memory {
        tracing::warn!("Production is running on the in-memory store; tasks will not survive a restart");
    }

    let store = DatabaseManager::open_store(config)
        .await
        .context("failed to open task store")?;
    let state = AppState::new(config.clone(), store).context("invalid JWT configuration")?;

    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Task manager API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
