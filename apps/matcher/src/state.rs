use crate::config::Config;
use crate::pipeline::MatchingPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the model backend and scoring config; cloning shares both.
    pub pipeline: MatchingPipeline,
    pub config: Config,
}
