//! Axum router: maps all URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    answers::submit_answers,
    complete::complete_session,
    health::health,
    questions::list_questions,
    results::{get_explanation, get_results},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/health", get(health))

        // API endpoints
        .route("/api/questions", get(list_questions))
        .route("/api/answers", post(submit_answers))
        .route("/api/complete", post(complete_session))
        .route("/api/results/{session_id}", get(get_results))
        .route("/api/results/{session_id}/explanation", get(get_explanation))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
