//! Shared application state for the web server.

use std::sync::Arc;
use votematch_db::{AnswerRepository, InMemoryStore, SurveyRepository};
use votematch_ranker::ResultService;

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub survey: Arc<dyn SurveyRepository>,
    pub answers: Arc<dyn AnswerRepository>,
    pub results: ResultService,
    /// Axes quoted in a match explanation.
    pub explanation_top_axes: usize,
}

impl AppState {
    /// State backed entirely by one in-memory store.
    pub fn in_memory(store: InMemoryStore, explanation_top_axes: usize) -> Self {
        let store = Arc::new(store);
        Self {
            survey: store.clone(),
            answers: store.clone(),
            results: ResultService::new(store.clone(), store),
            explanation_top_axes,
        }
    }
}

pub type SharedState = Arc<AppState>;
