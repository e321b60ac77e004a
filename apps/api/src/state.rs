use std::sync::Arc;

use crate::generation::client::GenerationBackend;
use crate::render::export::ExportBackend;
use crate::render::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The generation-service seam. Tests substitute a mock backend here.
    pub backend: Arc<dyn GenerationBackend>,
    /// Export collaborator — receives already-paginated content only.
    pub exporter: Arc<dyn ExportBackend>,
    /// Page geometry for pagination and export, from configuration.
    pub geometry: PageGeometry,
}
