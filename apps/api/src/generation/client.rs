//! Generation Client — the single point of entry for calls to the generation
//! service.
//!
//! ARCHITECTURAL RULE: no other module talks to the upstream API directly.
//! Every structured-generation request goes through `GenerationBackend`, and
//! every request carries the schema contract as a structural constraint so
//! the service emits only schema-conformant JSON text.
//!
//! The client makes exactly one outbound call per invocation and never
//! retries internally — retry policy belongs to the caller. The request
//! timeout is built into the HTTP client at construction; unbounded upstream
//! latency is not acceptable for an interactive flow.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::schema::SchemaContract;

/// The model used for all generation calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-1.5-flash-latest";

/// Default API base; overridable via `GEMINI_API_URL` for tests and proxies.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const REQUEST_TIMEOUT_SECS: u64 = 60;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The caller supplied an empty prompt. Detected locally — no network
    /// round-trip is attempted.
    #[error("prompt text is empty")]
    EmptyInput,

    /// Network failure, timeout, or a non-2xx upstream status.
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    /// The service answered 2xx but the candidate text is not parseable JSON.
    /// The undecodable text never crosses this boundary.
    #[error("generation service returned non-JSON output: {detail}")]
    MalformedOutput { detail: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Backend trait
// ────────────────────────────────────────────────────────────────────────────

/// Parsed JSON value of the service's output text.
pub type RawOutput = Value;

/// Seam for the external generation service. Handlers and the pipeline hold
/// `Arc<dyn GenerationBackend>` so tests can substitute a mock.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        contract: &SchemaContract,
    ) -> Result<RawOutput, GenerateError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the text of the first candidate part, if any.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP implementation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpGenerationClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpGenerationClient {
    pub fn new(api_url: impl Into<String>, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_url: api_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl GenerationBackend for HttpGenerationClient {
    async fn generate(
        &self,
        prompt: &str,
        contract: &SchemaContract,
    ) -> Result<RawOutput, GenerateError> {
        if prompt.trim().is_empty() {
            return Err(GenerateError::EmptyInput);
        }

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: contract.request_schema(),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_url, MODEL, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Transport {
                reason: transport_reason(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerateError::Transport {
                reason: format!("upstream status {status}: {message}"),
            });
        }

        let decoded: GenerateContentResponse =
            response.json().await.map_err(|e| GenerateError::Transport {
                reason: format!("unreadable response envelope: {e}"),
            })?;

        let text = decoded.text().ok_or(GenerateError::MalformedOutput {
            detail: "response contained no candidate text".to_string(),
        })?;

        let text = strip_json_fences(text);
        debug!(
            "generation service returned {} bytes of candidate text",
            text.len()
        );

        serde_json::from_str(text).map_err(|e| GenerateError::MalformedOutput {
            detail: e.to_string(),
        })
    }
}

fn transport_reason(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timeout after {REQUEST_TIMEOUT_SECS}s: {e}")
    } else {
        e.to_string()
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from service output.
/// Schema-constrained responses should be bare JSON, but fenced output still
/// shows up in the wild.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
