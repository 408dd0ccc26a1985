use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use votematch_common::SessionId;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequest {
    pub session_id: Option<String>,
}

/// POST /api/complete - Compute the session's result and store its snapshot
pub async fn complete_session(
    State(state): State<SharedState>,
    payload: Result<Json<CompleteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let session_id = req
        .session_id
        .filter(|s| !s.trim().is_empty())
        .map(SessionId::new)
        .ok_or_else(|| ApiError::BadRequest("Session ID required".to_string()))?;

    let results = state.results.complete_session(&session_id).await?;
    Ok(Json(results))
}
