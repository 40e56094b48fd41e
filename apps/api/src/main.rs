mod config;
mod configuration;
mod errors;
mod extract;
mod llm_client;
mod models;
mod prompt;
mod responder;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::file::{FileConfigurationStore, FileResponseStore};
use crate::store::memory::{MemoryConfigurationStore, MemoryResponseStore};
use crate::store::{ConfigurationStore, ResponseStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Responder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize stores
    let (configurations, responses) = open_stores(&config).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        configurations,
        responses,
        generator: Arc::new(llm),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Opens both stores on the configured backend.
async fn open_stores(
    config: &Config,
) -> Result<(Arc<dyn ConfigurationStore>, Arc<dyn ResponseStore>)> {
    match config.store_backend {
        StoreBackend::File => {
            let configurations: Arc<dyn ConfigurationStore> =
                Arc::new(FileConfigurationStore::open(&config.data_dir).await?);
            let responses: Arc<dyn ResponseStore> =
                Arc::new(FileResponseStore::open(&config.data_dir).await?);
            info!("File stores opened in {}", config.data_dir.display());
            Ok((configurations, responses))
        }
        StoreBackend::Memory => {
            info!("Using in-memory stores; data is lost on exit");
            let configurations: Arc<dyn ConfigurationStore> =
                Arc::new(MemoryConfigurationStore::new());
            let responses: Arc<dyn ResponseStore> = Arc::new(MemoryResponseStore::new());
            Ok((configurations, responses))
        }
    }
}
