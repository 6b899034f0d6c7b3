//! HTTP client for the Ollama API.
//!
//! Reuses a single `reqwest::Client`; deadlines are applied per request so
//! the short probe timeout and the long generation timeout can coexist on
//! one client.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::OllamaConfig;
use crate::error::{OllamaError, Result, make_snippet};

/// One installed model as reported by `GET /api/tags`.
///
/// Optional fields are passed through verbatim when present so the relay can
/// hand the upstream listing to its own callers unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

/// Thin client for Ollama.
///
/// Provides:
/// - [`OllamaClient::list_models`] — installed model listing
/// - [`OllamaClient::generate`]    — synchronous text generation
/// - [`OllamaClient::probe`]       — liveness check against `/api/tags`
pub struct OllamaClient {
    client: reqwest::Client,
    cfg: OllamaConfig,
    url_tags: String,
    url_generate: String,
}

impl OllamaClient {
    /// Creates a new [`OllamaClient`] from the given config.
    ///
    /// # Errors
    /// - [`OllamaError::InvalidEndpoint`] if `cfg.base_url` is invalid
    /// - [`OllamaError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: OllamaConfig) -> Result<Self> {
        cfg.validate()?;

        let client = reqwest::Client::builder().build()?;

        let base = cfg.base_url.trim().trim_end_matches('/').to_string();
        let url_tags = format!("{}/api/tags", base);
        let url_generate = format!("{}/api/generate", base);

        Ok(Self {
            client,
            cfg,
            url_tags,
            url_generate,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        self.cfg.base_url.trim().trim_end_matches('/')
    }

    /// Lists installed models via `GET /api/tags`.
    ///
    /// A tags response without a `models` field counts as an empty listing,
    /// not an error.
    ///
    /// # Errors
    /// - [`OllamaError::HttpStatus`] for non-2xx responses
    /// - [`OllamaError::Transport`] / [`OllamaError::Timeout`] for client errors
    /// - [`OllamaError::Decode`] if the response cannot be parsed
    #[instrument(skip_all)]
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        debug!("GET {}", self.url_tags);
        let resp = self
            .client
            .get(&self.url_tags)
            .timeout(self.cfg.probe_timeout)
            .send()
            .await
            .map_err(|e| self.map_transport(e, &self.url_tags, self.cfg.probe_timeout))?;

        if !resp.status().is_success() {
            return Err(self.status_error(resp, &self.url_tags).await);
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| OllamaError::Decode(format!("serde error in /api/tags: {e}")))?;

        Ok(tags.models.unwrap_or_default())
    }

    /// Performs a **non-streaming** generation request via `POST /api/generate`.
    ///
    /// The call is bounded by the configured generation deadline; when it is
    /// exceeded the pending request is canceled and [`OllamaError::Timeout`]
    /// returned.
    ///
    /// # Errors
    /// - [`OllamaError::Timeout`] when the deadline is exceeded
    /// - [`OllamaError::HttpStatus`] for non-2xx responses
    /// - [`OllamaError::Transport`] for client errors
    /// - [`OllamaError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %model))]
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .timeout(self.cfg.generate_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(e, &self.url_generate, self.cfg.generate_timeout))?;

        if !resp.status().is_success() {
            return Err(self.status_error(resp, &self.url_generate).await);
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            OllamaError::Decode(format!("serde error: {e}; ensure `stream=false` is used"))
        })?;

        Ok(out.response)
    }

    /// Liveness probe: `GET /api/tags` with the short probe deadline.
    ///
    /// The body is not decoded; a 2xx status is all the relay's health
    /// endpoint needs.
    ///
    /// # Errors
    /// - [`OllamaError::HttpStatus`] for non-2xx responses
    /// - [`OllamaError::Transport`] / [`OllamaError::Timeout`] for client errors
    #[instrument(skip_all)]
    pub async fn probe(&self) -> Result<()> {
        debug!("GET {}", self.url_tags);
        let resp = self
            .client
            .get(&self.url_tags)
            .timeout(self.cfg.probe_timeout)
            .send()
            .await
            .map_err(|e| self.map_transport(e, &self.url_tags, self.cfg.probe_timeout))?;

        if !resp.status().is_success() {
            return Err(self.status_error(resp, &self.url_tags).await);
        }

        Ok(())
    }

    fn map_transport(
        &self,
        err: reqwest::Error,
        url: &str,
        timeout: std::time::Duration,
    ) -> OllamaError {
        if err.is_timeout() {
            OllamaError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            OllamaError::Transport(err)
        }
    }

    async fn status_error(&self, resp: reqwest::Response, url: &str) -> OllamaError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        OllamaError::HttpStatus {
            status,
            url: url.to_string(),
            snippet: make_snippet(&text),
        }
    }
}

/* ==========================
HTTP payloads
========================== */

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response body for `/api/generate`.
///
/// Minimal shape: the generated text is in `response`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Response body for `/api/tags`.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Option<Vec<ModelInfo>>,
}
