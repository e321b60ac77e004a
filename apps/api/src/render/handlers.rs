//! Axum route handlers for the export API.

use anyhow::anyhow;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::generation::validate::validate;
use crate::render::paginate::paginate;
use crate::render::render;
use crate::schema::RESUME_CONTRACT;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportResumeRequest {
    /// A previously generated resume. Re-validated against the contract so
    /// rendering never sees an unchecked shape.
    pub resume: Value,
}

/// POST /api/v1/resume/export
///
/// Renders, paginates, and exports a validated resume as a PDF attachment.
/// The CPU-bound layout and PDF assembly run inside `spawn_blocking` to keep
/// the async executor unblocked.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportResumeRequest>,
) -> Result<Response, AppError> {
    let resume = validate(&request.resume, &RESUME_CONTRACT)
        .map_err(|e| AppError::Validation(format!("invalid resume payload: {e}")))?;

    let filename = if resume.name.is_empty() {
        "Resume-resume.pdf".to_string()
    } else {
        format!("{}-resume.pdf", resume.name)
    };

    let exporter = state.exporter.clone();
    let geometry = state.geometry.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        let model = render(&resume);
        let pages = paginate(&model, &geometry);
        exporter.export(&pages, &geometry)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in export: {e}")))??;

    info!("Exported resume PDF ({} bytes) as {filename}", bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
