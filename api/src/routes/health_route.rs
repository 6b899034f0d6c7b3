//! GET /api/health — liveness probe against the upstream tag endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use llm_service::OllamaError;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::core::app_state::AppState;

/// Response payload for /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ollama: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Handler: GET /api/health
///
/// 200 when the upstream answers the probe, 503 otherwise. Transport-level
/// failures carry their detail in `error`; an upstream that answers with an
/// error status does not (it is reachable, just unhealthy).
#[instrument(skip_all)]
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.ollama.probe().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                ollama: "connected",
                error: None,
            }),
        )
            .into_response(),
        Err(err) => {
            warn!(error = %err, "health probe failed");
            let detail = match &err {
                OllamaError::HttpStatus { .. } => None,
                other => Some(other.to_string()),
            };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    ollama: "disconnected",
                    error: detail,
                }),
            )
                .into_response()
        }
    }
}
