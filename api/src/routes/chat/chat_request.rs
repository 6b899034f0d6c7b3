use serde::{Deserialize, Serialize};

/// Request payload for /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user message to forward to the model.
    #[serde(default)]
    pub message: Option<String>,
    /// Optional model override; honored when installed upstream.
    #[serde(default)]
    pub model: Option<String>,
}

/// Response payload for /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Generated text.
    pub response: String,
    /// The model that actually served the request.
    pub model: String,
}
