//! End-to-end pipeline state machine for one generate action.
#![allow(dead_code)]
//!
//! Per request: `Idle → Serializing → AwaitingGeneration → Validating →
//! Rendered`, or `Failed(kind)` from any of the middle states. There is no
//! partial-success state: a request either reaches `Rendered` with a complete
//! result or terminates in `Failed` with the RenderModel untouched.
//!
//! The only suspension point is the generation call, so the session exposes a
//! split-phase API: `begin` serializes a snapshot and hands back a ticket,
//! the caller awaits the backend, and `complete` applies the outcome. Edits
//! remain legal while a request is in flight; `complete` discards any
//! response whose snapshot id no longer matches the document, so a stale
//! result can never overwrite the RenderModel of a newer state.

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::{serializer, Document, SnapshotId};
use crate::generation::client::{GenerateError, GenerationBackend, RawOutput};
use crate::generation::prompts::build_prompt;
use crate::generation::validate::{validate, SchemaViolation};
use crate::render::{render, RenderModel};
use crate::schema::SchemaContract;

// ────────────────────────────────────────────────────────────────────────────
// States and errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    EmptyInput,
    Transport,
    MalformedOutput,
    SchemaViolation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Serializing,
    AwaitingGeneration,
    Validating,
    Rendered,
    Failed(FailureKind),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A request is already outstanding. Callers re-firing after an edit use
    /// `resubmit`, which replaces the outstanding ticket instead.
    #[error("a generation request is already outstanding")]
    Busy,

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}

/// What `complete` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The result was validated, rendered, and now backs the RenderModel.
    Applied,
    /// The response was stale (superseded request or edited document) and
    /// was dropped without touching the RenderModel.
    DiscardedStale,
}

/// Tags one in-flight request with the exact document state it was
/// serialized from.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub request_id: Uuid,
    pub snapshot_id: SnapshotId,
    pub prompt: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

/// Owns the editable document, the pipeline stage, and the current
/// RenderModel. Single logical owner — no locking; results replace the
/// RenderModel wholesale.
pub struct ResumeSession {
    document: Document,
    stage: PipelineStage,
    outstanding: Option<(Uuid, SnapshotId)>,
    render_model: Option<RenderModel>,
}

impl Default for ResumeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeSession {
    pub fn new() -> Self {
        ResumeSession {
            document: Document::new(),
            stage: PipelineStage::Idle,
            outstanding: None,
            render_model: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Edits are permitted at any time, including while a request is in
    /// flight — the in-flight pipeline run holds its own snapshot.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn render_model(&self) -> Option<&RenderModel> {
        self.render_model.as_ref()
    }

    /// True while a request is outstanding. The UI uses this to disable
    /// plain re-submission.
    pub fn is_generating(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Starts a pipeline run: serializes a snapshot of the document and
    /// returns the ticket the caller passes to the backend and back to
    /// `complete`. Fails with `Busy` while another request is outstanding.
    pub fn begin(&mut self) -> Result<GenerationTicket, PipelineError> {
        if self.is_generating() {
            return Err(PipelineError::Busy);
        }
        Ok(self.submit())
    }

    /// Latest-wins variant of `begin` for callers that re-fire after an
    /// edit: the new ticket supersedes the outstanding one, whose eventual
    /// response will be discarded as stale.
    pub fn resubmit(&mut self) -> GenerationTicket {
        self.submit()
    }

    fn submit(&mut self) -> GenerationTicket {
        self.stage = PipelineStage::Serializing;
        let prompt = build_prompt(&serializer::serialize(&self.document));
        let ticket = GenerationTicket {
            request_id: Uuid::new_v4(),
            snapshot_id: self.document.snapshot_id(),
            prompt,
        };
        self.outstanding = Some((ticket.request_id, ticket.snapshot_id));
        self.stage = PipelineStage::AwaitingGeneration;
        info!(
            "Generation request {} submitted (snapshot {:?})",
            ticket.request_id, ticket.snapshot_id
        );
        ticket
    }

    /// Applies the outcome of one generation call.
    ///
    /// Stale responses — a superseded ticket, or a snapshot id that no longer
    /// matches the document — are discarded without touching the RenderModel
    /// or recording a failure. For the live ticket, a successful outcome is
    /// validated and rendered; any failure moves the pipeline to
    /// `Failed(kind)` and surfaces the originating error.
    pub fn complete(
        &mut self,
        ticket: &GenerationTicket,
        outcome: Result<RawOutput, GenerateError>,
        contract: &SchemaContract,
    ) -> Result<CompletionOutcome, PipelineError> {
        let is_latest = self
            .outstanding
            .is_some_and(|(request_id, _)| request_id == ticket.request_id);
        if !is_latest {
            warn!(
                "Discarding superseded generation response (request {})",
                ticket.request_id
            );
            return Ok(CompletionOutcome::DiscardedStale);
        }

        if ticket.snapshot_id != self.document.snapshot_id() {
            warn!(
                "Discarding stale generation response (request {}, document edited since)",
                ticket.request_id
            );
            self.outstanding = None;
            self.stage = PipelineStage::Idle;
            return Ok(CompletionOutcome::DiscardedStale);
        }

        self.outstanding = None;

        let raw = match outcome {
            Ok(raw) => raw,
            Err(e) => {
                self.stage = PipelineStage::Failed(failure_kind(&e));
                return Err(PipelineError::Generate(e));
            }
        };

        self.stage = PipelineStage::Validating;
        match validate(&raw, contract) {
            Ok(resume) => {
                // The new result replaces the previous RenderModel in full.
                self.render_model = Some(render(&resume));
                self.stage = PipelineStage::Rendered;
                info!("Generation request {} rendered", ticket.request_id);
                Ok(CompletionOutcome::Applied)
            }
            Err(violation) => {
                self.stage = PipelineStage::Failed(FailureKind::SchemaViolation);
                Err(PipelineError::Schema(violation))
            }
        }
    }

    /// Convenience driver for callers without interleaved edits:
    /// begin → generate → complete.
    pub async fn run_once(
        &mut self,
        backend: &dyn GenerationBackend,
        contract: &SchemaContract,
    ) -> Result<CompletionOutcome, PipelineError> {
        let ticket = self.begin()?;
        let outcome = backend.generate(&ticket.prompt, contract).await;
        self.complete(&ticket, outcome, contract)
    }
}

fn failure_kind(error: &GenerateError) -> FailureKind {
    match error {
        GenerateError::EmptyInput => FailureKind::EmptyInput,
        GenerateError::Transport { .. } => FailureKind::Transport,
        GenerateError::MalformedOutput { .. } => FailureKind::MalformedOutput,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
