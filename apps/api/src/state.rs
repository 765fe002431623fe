use std::sync::Arc;

use crate::config::Config;
use crate::import::ResumeParser;
use crate::parser::ParserTuning;
use crate::resumes::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Postgres-backed in production; in-memory in router tests.
    pub store: Arc<dyn ResumeStore>,
    /// Upload backend. Default: HeuristicParser. Swap via PARSER_BACKEND.
    pub parser: Arc<dyn ResumeParser>,
    /// Thresholds for the in-process heuristics (text import and HeuristicParser).
    pub tuning: ParserTuning,
}
