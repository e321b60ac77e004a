// Structured generation: prompt assembly, the generation-service client, and
// strict validation of what comes back. All upstream calls go through
// client::GenerationBackend — no direct service calls elsewhere.

pub mod client;
pub mod handlers;
pub mod prompts;
pub mod validate;
