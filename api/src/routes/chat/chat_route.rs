//! POST /api/chat — forwards one message to the upstream generation endpoint.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use llm_service::{DEFAULT_MODEL, resolve_model};
use tracing::{debug, instrument, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Client-facing message for an exceeded generation deadline.
pub(crate) const TIMEOUT_MESSAGE: &str =
    "Request timeout - The model is taking too long to respond. Try a smaller model or a shorter message.";

/// Handler: POST /api/chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3002/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"Hello","model":"llama3.2:latest"}'
/// ```
#[instrument(skip_all)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = payload?;

    let message = body.message.as_deref().unwrap_or("").trim().to_string();
    if message.is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let model = resolve_chat_model(&state, body.model.as_deref()).await;
    debug!(%model, "forwarding chat message");

    match state.ollama.generate(&model, &message).await {
        Ok(response) => Ok(Json(ChatResponse { response, model })),
        Err(err) if err.is_timeout() => Err(AppError::Timeout(TIMEOUT_MESSAGE.to_string())),
        Err(err) => {
            warn!(error = %err, "generation failed");
            Err(AppError::Upstream(
                "Failed to get response from Ollama".to_string(),
            ))
        }
    }
}

/// Resolves the generation model against the installed set. When the tag
/// listing itself fails, the requested name (or the default) is used as-is
/// and the generation call surfaces the real problem.
pub(crate) async fn resolve_chat_model(state: &AppState, requested: Option<&str>) -> String {
    match state.ollama.list_models().await {
        Ok(available) => resolve_model(requested, &available),
        Err(err) => {
            warn!(error = %err, "tag listing failed, skipping model resolution");
            requested
                .filter(|name| !name.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string())
        }
    }
}
