use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use itinera::config::AppConfig;
use itinera::provider::GeminiClient;
use itinera::service::ItineraryService;
use itinera::store::ItineraryStore;
use itinera::web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("itinera=info")),
        )
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let store =
        ItineraryStore::open(&config.store.path).context("Failed to open document store")?;
    let generator =
        Arc::new(GeminiClient::new(&config.gemini).context("Failed to create Gemini client")?);
    let service = Arc::new(ItineraryService::new(
        generator,
        store,
        config.gemini.temperature,
    ));

    web::run(config.server.port, service)
        .await
        .context("Server failed")?;
    Ok(())
}
