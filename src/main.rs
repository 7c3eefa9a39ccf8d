//! Bookshelf Server - Library Catalog
//!
//! Serves the book catalog REST API over a MongoDB collection.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use bookshelf_server::{
    api,
    config::{AppConfig, LoggingConfig},
    logging,
    repository::{self, MongoBookRepository},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            logging::init(&LoggingConfig::default())?;
            tracing::error!("Failed to load configuration: {}", e);
            return Err(anyhow::Error::new(e).context("Failed to load configuration"));
        }
    };

    logging::init(&config.logging)?;

    tracing::info!("Starting Bookshelf Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        tracing::error!("Startup failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    // Connect to the document store
    let database = repository::connect(&config.database)
        .await
        .with_context(|| format!("Failed to connect to MongoDB at {}", config.database.server))?;

    tracing::info!(
        "Connected to MongoDB at {}, database {}",
        config.database.server,
        config.database.name
    );

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create application state
    let repository = Arc::new(MongoBookRepository::new(&database));
    let state = AppState::new(config, repository);

    // Build router
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
