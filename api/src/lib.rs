//! HTTP relay in front of a locally running Ollama server.
//!
//! The surface is deliberately thin: each route validates its input, makes a
//! single upstream call with a bounded deadline, reshapes the JSON, and maps
//! failures onto a small status-code taxonomy. No retries, no partial
//! responses.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod core;
pub mod error_handler;
mod routes;

pub use crate::core::app_state::{ApiConfig, AppState};
pub use crate::error_handler::{AppError, AppResult};

use crate::routes::{
    chat::chat_route::chat,
    docs_route::api_docs,
    health_route::health,
    models_route::list_models,
    template::template_route::{list_templates, run_template},
};

/// Boots the relay: loads config from the environment, builds the router,
/// binds, and serves until ctrl-c.
///
/// # Errors
/// Returns [`AppError`] on configuration, bind, or server failures.
pub async fn start() -> AppResult<()> {
    let config = ApiConfig::from_env()?;
    let state = Arc::new(AppState::from_config(&config)?);

    let app = router(state, config.enable_docs);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;

    info!(%addr, ollama = %config.ollama.base_url, "relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Builds the relay router. Public so integration tests can serve it against
/// a mocked upstream.
pub fn router(state: Arc<AppState>, enable_docs: bool) -> Router {
    let mut router = Router::new()
        .route("/api/models", get(list_models))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/templates", get(list_templates))
        .route("/api/{template_slug}", get(run_template));

    if enable_docs {
        router = router.route("/api-docs", get(api_docs));
    }

    router
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Resolves when ctrl-c is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
}
