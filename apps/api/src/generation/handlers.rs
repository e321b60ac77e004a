//! Axum route handlers for the resume generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::prompts::build_prompt;
use crate::generation::validate::validate;
use crate::models::resume::GeneratedResume;
use crate::schema::RESUME_CONTRACT;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    /// The serialized document details, as produced by the prompt serializer.
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub resume: GeneratedResume,
}

/// POST /api/v1/resume/generate
///
/// Runs the generate → validate slice of the pipeline for a caller that has
/// already serialized its document. Returns the complete validated resume,
/// or an error — never a partial result.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    let details = request.details.unwrap_or_default();
    if details.trim().is_empty() {
        return Err(AppError::MissingDetails);
    }

    let request_id = Uuid::new_v4();
    info!("Generating structured resume (request {request_id})");

    let prompt = build_prompt(&details);
    let raw = state.backend.generate(&prompt, &RESUME_CONTRACT).await?;
    let resume = validate(&raw, &RESUME_CONTRACT)?;

    info!("Resume generated and validated (request {request_id})");
    Ok(Json(GenerateResumeResponse { resume }))
}
