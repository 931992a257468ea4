use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::MatchServices;
use crate::profile::SkillLexicon;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; read-only afterwards.
    pub lexicon: Arc<SkillLexicon>,
    /// Live or synthetic backend, chosen from PIPELINE_MODE.
    pub services: Arc<dyn MatchServices>,
}
