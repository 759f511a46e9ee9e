use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::FailureResponse;

/// Error tag returned to the browser for every failed analysis.
/// The specific reason stays in the server log.
pub const FAILURE_MESSAGE: &str = "Failed to process request";
pub const NO_CONTENT_MESSAGE: &str = "No content provided for analysis";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Analysis failures (bad input or upstream) answer 500 with the full
/// assessment shape: all-default scores plus `error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM error: {0}")]
    Upstream(#[from] LlmError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidInput(msg) => {
                tracing::warn!("Rejected analysis request: {msg}");
                analysis_failure()
            }
            AppError::Upstream(e) => {
                tracing::error!("LLM error: {e}");
                analysis_failure()
            }
            AppError::NotFound(msg) => {
                let body = Json(json!({
                    "error": {
                        "code": "NOT_FOUND",
                        "message": msg
                    }
                }));
                (StatusCode::NOT_FOUND, body).into_response()
            }
        }
    }
}

fn analysis_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse::new(FAILURE_MESSAGE)),
    )
        .into_response()
}
