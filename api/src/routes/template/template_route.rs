//! GET /api/templates and GET /api/{template_slug} — template browsing and
//! one-shot template runs.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::chat::chat_route::{TIMEOUT_MESSAGE, resolve_chat_model},
    routes::template::template_response::{TemplateListResponse, TemplateRunResponse},
};

/// Handler: GET /api/templates
///
/// The machine counterpart of the template browser: the full catalog, in
/// insertion order.
#[instrument(skip_all)]
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: state.catalog.all(),
    })
}

/// Handler: GET /api/{template_slug}
///
/// Looks the template up, substitutes query parameters into its prompt, and
/// forwards the rendered prompt to the upstream generation endpoint.
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:3002/api/brainstorm?topic=rust+crates&count=5'
/// ```
#[instrument(skip_all, fields(slug = %template_slug))]
pub async fn run_template(
    State(state): State<Arc<AppState>>,
    Path(template_slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TemplateRunResponse>, AppError> {
    let template = state
        .catalog
        .get(&template_slug)
        .ok_or_else(|| AppError::NotFound(format!("Template '{template_slug}' not found")))?;

    let values: HashMap<String, Value> = params
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();

    let validation = template_service::validate_parameters(template, &values);
    if !validation.is_valid {
        return Err(AppError::Validation(describe_validation(&validation)));
    }

    let prompt = template_service::render_prompt(template, &values)
        .map_err(|err| AppError::Validation(err.to_string()))?;

    // A `model` query parameter overrides the template's pinned model.
    let requested = params
        .get("model")
        .map(String::as_str)
        .or(template.model.as_deref());
    let model = resolve_chat_model(&state, requested).await;
    debug!(%model, "forwarding rendered template prompt");

    match state.ollama.generate(&model, &prompt).await {
        Ok(response) => Ok(Json(TemplateRunResponse {
            template: template.clone(),
            prompt,
            response,
            model,
            parameters: values,
        })),
        Err(err) if err.is_timeout() => Err(AppError::Timeout(TIMEOUT_MESSAGE.to_string())),
        Err(err) => {
            warn!(error = %err, "generation failed");
            Err(AppError::Upstream(
                "Failed to get response from Ollama".to_string(),
            ))
        }
    }
}

fn describe_validation(validation: &template_service::ParameterValidation) -> String {
    let mut problems = Vec::new();
    if !validation.missing_required.is_empty() {
        problems.push(format!(
            "Missing required parameters: {}",
            validation.missing_required.join(", ")
        ));
    }
    if !validation.invalid_types.is_empty() {
        problems.push(format!(
            "Invalid parameters: {}",
            validation.invalid_types.join(", ")
        ));
    }
    problems.join(". ")
}
