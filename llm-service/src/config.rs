//! Ollama connection settings loaded from environment variables.
//!
//! # Environment variables
//!
//! - `OLLAMA_BASE_URL` = full endpoint, e.g. `http://localhost:11434`
//! - `OLLAMA_PORT`     = fallback, expands to `http://localhost:{port}`
//!
//! When neither is set the conventional local default is used.

use std::time::Duration;

use crate::error::{OllamaError, Result};

/// Conventional endpoint of a locally running Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Deadline for generation calls. Large models on CPU are slow, so this is
/// deliberately generous (5 minutes).
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(300);

/// Deadline for tag listing and liveness probes.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`crate::OllamaClient`].
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server (scheme required).
    pub base_url: String,
    /// Per-request deadline for `/api/generate`.
    pub generate_timeout: Duration,
    /// Per-request deadline for `/api/tags`.
    pub probe_timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            generate_timeout: GENERATE_TIMEOUT,
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

impl OllamaConfig {
    /// Resolves the endpoint from the environment.
    ///
    /// Precedence:
    /// 1. `OLLAMA_BASE_URL` if present and non-empty
    /// 2. `OLLAMA_PORT` → `http://localhost:{port}`
    /// 3. [`DEFAULT_BASE_URL`]
    ///
    /// # Errors
    /// - [`OllamaError::InvalidNumber`] if `OLLAMA_PORT` is not a valid port
    /// - [`OllamaError::InvalidEndpoint`] if the resolved URL has no http(s) scheme
    pub fn from_env() -> Result<Self> {
        let base_url = match std::env::var("OLLAMA_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => match std::env::var("OLLAMA_PORT") {
                Ok(port) if !port.trim().is_empty() => {
                    let _ = port
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| OllamaError::InvalidNumber {
                            var: "OLLAMA_PORT",
                            reason: "expected u16 (1..=65535)",
                        })?;
                    format!("http://localhost:{}", port.trim())
                }
                _ => DEFAULT_BASE_URL.to_string(),
            },
        };

        let config = Self {
            base_url,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the endpoint is non-empty and carries an http(s) scheme.
    ///
    /// # Errors
    /// Returns [`OllamaError::InvalidEndpoint`] otherwise.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.base_url.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(OllamaError::InvalidEndpoint(self.base_url.clone()));
        }
        Ok(())
    }
}
