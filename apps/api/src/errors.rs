#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::client::GenerateError;
use crate::generation::validate::SchemaViolation;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Error bodies are a flat `{"error": message}` object.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No details provided in the request.")]
    MissingDetails,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Schema(#[from] SchemaViolation),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingDetails => (
                StatusCode::BAD_REQUEST,
                "No details provided in the request.".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // An empty prompt is a caller mistake, caught before any network
            // round-trip — same 400 as a missing details field.
            AppError::Generate(GenerateError::EmptyInput) => (
                StatusCode::BAD_REQUEST,
                "No details provided in the request.".to_string(),
            ),
            AppError::Generate(e) => {
                tracing::error!("Generation failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate structured resume.".to_string(),
                )
            }
            AppError::Schema(e) => {
                tracing::error!("Generated output violated the schema contract: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate structured resume.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
