use axum::{extract::State, response::IntoResponse, Json};

use crate::error::ApiError;
use crate::state::SharedState;

/// GET /api/questions - Questions with options, in survey order
pub async fn list_questions(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let questions = state.survey.fetch_questions().await?;
    Ok(Json(serde_json::json!({ "questions": questions })))
}
