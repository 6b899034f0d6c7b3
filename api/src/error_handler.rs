use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::core::app_state::ConfigError;

/// Public application error type.
///
/// Request-path variants carry the exact message the client sees; the body
/// is always `{"error": <message>}`.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    /// Bad or missing request input.
    #[error("{0}")]
    Validation(String),

    /// Unknown template slug or route.
    #[error("{0}")]
    NotFound(String),

    /// Upstream exceeded the generation deadline.
    #[error("{0}")]
    Timeout(String),

    /// Upstream unreachable or returned a non-success response.
    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only, never reaches a client under normal operation
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert body-extraction rejections into the same `{"error": ...}` shape.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Validation(err.to_string())
    }
}
