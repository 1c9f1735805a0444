use std::sync::Arc;

use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-request data: every request runs its pipeline independently.
#[derive(Clone)]
pub struct AppState {
    /// Production: `LlmClient`. Tests swap in a stub.
    pub llm: Arc<dyn ChatModel>,
}
