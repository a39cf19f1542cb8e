//! task_gateway - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the task generation API.

use task_gateway::{api, config::Config};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    if config.api_key.is_none() {
        warn!(
            "OPENROUTER_API_KEY is not set. Requests to OpenRouter will fail with 401. \
             Set the environment variable OPENROUTER_API_KEY."
        );
    }

    api::serve(config).await?;

    Ok(())
}
