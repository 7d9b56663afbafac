use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::render::PdfRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Completion gateway. `DeepSeekClient` normally, `FallbackGenerator` in degraded mode.
    pub generator: Arc<dyn TextGenerator>,
    pub renderer: Arc<dyn PdfRenderer>,
    pub config: Config,
}
