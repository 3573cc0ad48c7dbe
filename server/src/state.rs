//! Shared server state.

use crate::artifacts::ArtifactStore;
use crate::sessions::SessionStore;
use souschef_core::image::ImageModel;
use souschef_core::llm::LlmProvider;

/// Everything handlers share: the model clients, the live session registry,
/// and the on-disk artifact store.
pub struct ServerState {
    pub llm: Box<dyn LlmProvider>,
    pub images: Box<dyn ImageModel>,
    pub sessions: SessionStore,
    pub artifacts: ArtifactStore,
}
