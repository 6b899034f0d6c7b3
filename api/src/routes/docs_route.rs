//! GET /api-docs — the OpenAPI document for the relay surface.
//!
//! Served as plain JSON behind the `ENABLE_SWAGGER` flag. The document is
//! static; it describes the surface, it does not drive it.

use axum::Json;
use serde_json::{Value, json};
use tracing::instrument;

/// Handler: GET /api-docs
#[instrument(skip_all)]
pub async fn api_docs() -> Json<Value> {
    Json(json!({
        "openapi": "3.0.0",
        "info": {
            "title": "OLLM API",
            "version": "1.0.0",
            "description": "Relay API for a locally running Ollama server"
        },
        "paths": {
            "/api/models": {
                "get": {
                    "summary": "List installed models",
                    "responses": {
                        "200": { "description": "Model listing" },
                        "500": { "description": "Upstream failure" }
                    }
                }
            },
            "/api/health": {
                "get": {
                    "summary": "Upstream liveness probe",
                    "responses": {
                        "200": { "description": "Ollama reachable" },
                        "503": { "description": "Ollama unreachable" }
                    }
                }
            },
            "/api/chat": {
                "post": {
                    "summary": "Forward one message to the generation endpoint",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["message"],
                                    "properties": {
                                        "message": { "type": "string", "example": "Hello, how are you?" },
                                        "model": { "type": "string", "example": "llama3.2:latest" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": { "description": "Generated response" },
                        "400": { "description": "Missing message" },
                        "408": { "description": "Generation deadline exceeded" },
                        "500": { "description": "Upstream failure" }
                    }
                }
            },
            "/api/templates": {
                "get": {
                    "summary": "List conversation templates",
                    "responses": {
                        "200": { "description": "Template catalog" }
                    }
                }
            },
            "/api/{templateSlug}": {
                "get": {
                    "summary": "Run a conversation template",
                    "parameters": [
                        {
                            "name": "templateSlug",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" },
                            "example": "brainstorm"
                        }
                    ],
                    "responses": {
                        "200": { "description": "Rendered prompt and generated response" },
                        "400": { "description": "Missing or invalid parameters" },
                        "404": { "description": "Unknown template slug" },
                        "408": { "description": "Generation deadline exceeded" },
                        "500": { "description": "Upstream failure" }
                    }
                }
            }
        }
    }))
}
