//! Thin client for a locally running Ollama server.
//!
//! The relay only needs three upstream calls, all JSON over HTTP:
//! - `GET  {endpoint}/api/tags`     — installed model listing / liveness probe
//! - `POST {endpoint}/api/generate` — synchronous text generation (`stream=false`)
//!
//! plus a pure helper that picks a generation model from the installed set
//! ([`resolve_model`]). Generation calls are bounded by an explicit
//! per-request deadline; there are no retries, so a single upstream call
//! either succeeds or its error is surfaced to the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod resolve;

pub use client::{ModelInfo, OllamaClient};
pub use config::OllamaConfig;
pub use error::{OllamaError, Result};
pub use resolve::{DEFAULT_MODEL, resolve_model};
