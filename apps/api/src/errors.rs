use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::intake::pdf::ExtractionError;
use crate::llm_client::LlmError;
use crate::pricing::PricingError;
use crate::schema::SchemaError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is terminal for the current request: nothing is retried and
/// nothing is kept across a failure.
#[derive(Debug, Error)]
pub enum AppError {
    /// User-correctable form errors, reported as a list.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resume extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Model output rejected: {0}")]
    Schema(#[from] SchemaError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Extraction(_) => (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_ERROR"),
            AppError::Llm(_) => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
            AppError::Schema(_) => (StatusCode::BAD_GATEWAY, "SCHEMA_ERROR"),
            AppError::Pricing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PRICING_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let body = match &self {
            AppError::Validation(messages) => json!({
                "error": {
                    "code": code,
                    "message": "Please fix the highlighted inputs.",
                    "details": messages,
                }
            }),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                json!({
                    "error": {
                        "code": code,
                        "message": "An internal server error occurred",
                    }
                })
            }
            other => {
                if status.is_server_error() {
                    tracing::error!("{other}");
                } else {
                    tracing::warn!("{other}");
                }
                json!({
                    "error": {
                        "code": code,
                        "message": other.to_string(),
                    }
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
