use llm_service::{OllamaClient, OllamaConfig, OllamaError};
use template_service::{CatalogError, TemplateCatalog};
use thiserror::Error;

/// Errors raised while loading configuration or building shared state.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Ollama(#[from] OllamaError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Relay settings loaded from environment variables.
///
/// - `PORT`           — listen port (default 3002)
/// - `ENABLE_SWAGGER` — serve `/api-docs` (default on; `false`/`0` disables)
/// - Ollama settings via [`OllamaConfig::from_env`]
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_docs: bool,
    pub ollama: OllamaConfig,
}

impl ApiConfig {
    /// Load relay settings from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: "PORT",
                        reason: "expected u16 (1..=65535)",
                    })?
            }
            _ => 3002,
        };

        let enable_docs = match std::env::var("ENABLE_SWAGGER") {
            Ok(raw) => {
                let raw = raw.trim().to_lowercase();
                !(raw == "false" || raw == "0")
            }
            Err(_) => true,
        };

        Ok(Self {
            port,
            enable_docs,
            ollama: OllamaConfig::from_env()?,
        })
    }
}

/// Shared state for all HTTP handlers. Read-only after boot.
pub struct AppState {
    /// Client for the upstream Ollama server.
    pub ollama: OllamaClient,
    /// The template catalog, loaded once from bundled data.
    pub catalog: TemplateCatalog,
}

impl AppState {
    /// Builds shared state from a loaded config.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            ollama: OllamaClient::new(config.ollama.clone())?,
            catalog: TemplateCatalog::bundled()?,
        })
    }

    /// State over an explicit client and catalog; used by tests to point the
    /// relay at a mock upstream.
    pub fn new(ollama: OllamaClient, catalog: TemplateCatalog) -> Self {
        Self { ollama, catalog }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_yields_a_usable_config() {
        // Whatever the surrounding environment, the resolved endpoint must
        // carry a scheme and the state must build from it.
        let config = ApiConfig::from_env().unwrap();
        assert!(config.ollama.base_url.starts_with("http"));
        assert!(AppState::from_config(&config).is_ok());
    }
}
