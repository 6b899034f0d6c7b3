use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use template_service::Template;

/// Response payload for /api/templates.
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<Template>,
}

/// Response payload for /api/{template_slug}.
#[derive(Debug, Serialize)]
pub struct TemplateRunResponse {
    /// The full template definition that was run.
    pub template: Template,
    /// The rendered prompt that was sent upstream.
    pub prompt: String,
    /// Generated text.
    pub response: String,
    /// The model that actually served the request.
    pub model: String,
    /// The parameter values that were substituted.
    pub parameters: HashMap<String, Value>,
}
