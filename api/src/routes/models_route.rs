//! GET /api/models — installed model listing, passed through from upstream.

use std::sync::Arc;

use axum::{Json, extract::State};
use llm_service::ModelInfo;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::{core::app_state::AppState, error_handler::AppError};

/// Response payload for /api/models.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

/// Handler: GET /api/models
///
/// Forwards to the upstream tag listing; an upstream without a `models`
/// field yields an empty array, any upstream failure a 500.
#[instrument(skip_all)]
pub async fn list_models(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelsResponse>, AppError> {
    match state.ollama.list_models().await {
        Ok(models) => Ok(Json(ModelsResponse { models })),
        Err(err) => {
            warn!(error = %err, "tag listing failed");
            Err(AppError::Upstream(
                "Failed to fetch models from Ollama".to_string(),
            ))
        }
    }
}
