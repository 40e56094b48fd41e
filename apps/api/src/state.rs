use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::store::{ConfigurationStore, ResponseStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Backend chosen at startup via `STORE_BACKEND`.
    pub configurations: Arc<dyn ConfigurationStore>,
    pub responses: Arc<dyn ResponseStore>,
    /// `LlmClient` in production; swapped for a stub in tests.
    pub generator: Arc<dyn TextGenerator>,
}
