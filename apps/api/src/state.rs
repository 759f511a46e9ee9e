use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ContentGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Upstream model. Default: `LlmClient` against Gemini; tests inject a stub.
    pub llm: Arc<dyn ContentGenerator>,
    pub config: Config,
}
