use std::error::Error;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events reach the console.
const LOG_TARGETS: &[&str] = &[
    "convert_chat_backend",
    "api",
    "contextor",
    "formula_store",
    "file_advisor",
    ai_llm_service::telemetry::TARGET_PREFIX,
    "tower_http",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(ai_llm_service::telemetry::layer_for(LOG_TARGETS))
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting conversion chat backend");
    api::start().await?;

    Ok(())
}
