//! Answer submission.

use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use votematch_common::{Answer, Question, QuestionId, SessionId};

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub session_id: Option<String>,
    pub answers: Option<Vec<AnswerInput>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question_id: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswersResponse {
    pub success: bool,
    pub count: usize,
}

/// Every answer must name a catalog question and carry a value it accepts.
fn check_against_catalog(questions: &[Question], answers: &[Answer]) -> Result<(), ApiError> {
    let by_id: HashMap<&QuestionId, &Question> = questions.iter().map(|q| (&q.id, q)).collect();
    for answer in answers {
        let question = by_id
            .get(&answer.question_id)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown question: {}", answer.question_id)))?;
        if !question.accepts(&answer.answer_value) {
            return Err(ApiError::BadRequest(format!(
                "Value {:?} is not an option of question {}",
                answer.answer_value, answer.question_id
            )));
        }
    }
    Ok(())
}

/// POST /api/answers - Record answers for a session
pub async fn submit_answers(
    State(state): State<SharedState>,
    payload: Result<Json<SubmitAnswersRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let (Some(session_id), Some(inputs)) = (req.session_id, req.answers) else {
        return Err(ApiError::BadRequest("Invalid request".to_string()));
    };
    let session_id = SessionId::new(session_id);

    let answers: Vec<Answer> = inputs
        .into_iter()
        .map(|a| Answer::new(session_id.clone(), a.question_id, a.value))
        .collect();

    let questions = state.survey.fetch_questions().await?;
    check_against_catalog(&questions, &answers)?;

    // empty lists and blank session ids are rejected by the store
    let count = state.answers.record_answers(&session_id, &answers).await?;
    tracing::info!(session_id = %session_id, count, "Answers submitted");

    Ok(Json(SubmitAnswersResponse { success: true, count }))
}
