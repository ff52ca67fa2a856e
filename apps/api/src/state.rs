use std::sync::Arc;

use crate::config::Config;
use crate::interview::controller::InterviewController;
use crate::render::PageRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub interviews: Arc<InterviewController>,
    pub pages: Arc<PageRenderer>,
    pub config: Config,
}
