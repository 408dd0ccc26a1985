use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use votematch_common::SessionId;

use crate::error::ApiError;
use crate::state::SharedState;

/// GET /api/results/{session_id} - Stored snapshot, or a live calculation
pub async fn get_results(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let results = state.results.get_results(&SessionId::new(session_id)).await?;
    Ok(Json(results))
}

/// GET /api/results/{session_id}/explanation - Why the best match matched
pub async fn get_explanation(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = SessionId::new(session_id);
    match state
        .results
        .explain_best_match(&session_id, state.explanation_top_axes)
        .await?
    {
        Some(explanation) => Ok(Json(explanation)),
        None => Err(ApiError::NotFound("No party has positions to match against".to_string())),
    }
}
