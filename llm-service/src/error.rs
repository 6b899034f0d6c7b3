//! Unified error handling for `llm-service`.
//!
//! All messages include the suffix `[LLM Service]` to simplify attribution
//! in logs. Timeouts get their own variant so the HTTP layer can map them to
//! a distinct status code.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors produced by [`crate::OllamaClient`] and its configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OllamaError {
    /// Invalid endpoint (empty or missing http/https).
    #[error("[LLM Service] invalid Ollama endpoint: {0}")]
    InvalidEndpoint(String),

    /// A number in the environment failed to parse (like ports or timeouts).
    #[error("[LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `OLLAMA_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u16`).
        reason: &'static str,
    },

    /// Transport/HTTP client error.
    #[error("[LLM Service] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream call exceeded its per-request deadline.
    #[error("[LLM Service] request to {url} timed out after {timeout:?}")]
    Timeout {
        /// Request URL.
        url: String,
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// Non-successful HTTP status from upstream.
    #[error("[LLM Service] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Unexpected/invalid JSON response.
    #[error("[LLM Service] failed to decode response: {0}")]
    Decode(String),
}

impl OllamaError {
    /// True when the error is the generation deadline being exceeded.
    pub fn is_timeout(&self) -> bool {
        matches!(self, OllamaError::Timeout { .. })
    }
}

/// Trims an upstream response body to a short, log-friendly snippet.
pub(crate) fn make_snippet(text: &str) -> String {
    text.chars().take(240).collect()
}
