//! HTTP surface of the conversion chat backend.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use crate::core::app_state::{AppState, ConfigError};
pub use crate::error_handler::AppError;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        catalog::{formats_route::formats, units_route::units},
        conversion_chat::conversion_chat_route::conversion_chat,
        health_route::health,
        unit_selection::unit_selection_route::unit_selection,
    },
};

/// Listen address when `API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:3000";

/// All routes with their middleware, ready to serve or to drive in tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/conversion-chat", post(conversion_chat))
        .route("/api/unit-selection", post(unit_selection))
        .route("/api/units", get(units))
        .route("/api/formats", get(formats))
        .layer(middleware::from_fn(json_error_mapper))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());

    let state = Arc::new(AppState::from_env()?);
    info!(
        formulas_dir = %state.pipeline.corpus().loader().dir().display(),
        openai_model = %state.settings.openai_model,
        gemini_model = %state.settings.gemini_model,
        "state loaded"
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %host_url, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed. If the handler cannot be installed the
/// server keeps running until killed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
