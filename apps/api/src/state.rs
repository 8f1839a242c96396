use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionBackend;
use crate::ranking::criteria::CriteriaExtractor;
use crate::ranking::scorer::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data: criteria and results live only for one request.
#[derive(Clone)]
pub struct AppState {
    pub criteria_extractor: CriteriaExtractor,
    pub resume_scorer: ResumeScorer,
    /// Max backend calls in flight per scoring batch.
    pub scoring_concurrency: usize,
}

impl AppState {
    /// Wires both ranking components to the same backend.
    pub fn new(backend: Arc<dyn CompletionBackend>, config: &Config) -> Self {
        Self::with_concurrency(backend, config.scoring_concurrency)
    }

    pub fn with_concurrency(backend: Arc<dyn CompletionBackend>, scoring_concurrency: usize) -> Self {
        Self {
            criteria_extractor: CriteriaExtractor::new(Arc::clone(&backend)),
            resume_scorer: ResumeScorer::new(backend),
            scoring_concurrency: scoring_concurrency.max(1),
        }
    }
}
