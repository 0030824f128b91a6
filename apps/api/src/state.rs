use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::evaluator::MatchService;
use crate::store::{JobStore, ProfileStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<ProfileStore>,
    pub jobs: Arc<JobStore>,
    pub matcher: MatchService,
    /// `None` when no API key is configured; Q&A is then unavailable.
    pub llm: Option<LlmClient>,
    pub config: Config,
}
