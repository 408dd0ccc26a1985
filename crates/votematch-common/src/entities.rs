//! Core entity types mirroring the survey catalog tables.
//! These are Rust representations of the rows the surrounding application
//! owns; the scoring crates only ever read them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::{Result, VoteMatchError};
use crate::ids::{AxisId, PartyId, QuestionId, SessionId};

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One bipolar ideological dimension, scored in [-100, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub id: AxisId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Display sequence only; scoring never depends on it.
    #[serde(default)]
    pub order_index: i32,
}

impl Axis {
    pub fn new(id: impl Into<AxisId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: String::new(),
            description: String::new(),
            order_index: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

/// Survey question types. Descriptive metadata: the scorer matches answer
/// values by plain string equality whatever the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultiChoice,
    DropdownSingle,
    DropdownMulti,
    Ranking,
    ForcedChoicePair,
    MatrixSingle,
    MatrixMulti,
    #[serde(rename = "likert_5")]
    Likert5,
    #[serde(rename = "likert_7")]
    Likert7,
    #[serde(rename = "slider_0_100")]
    Slider0To100,
    NumericInput,
    Allocation,
    ScenarioSingle,
    ScenarioMulti,
    VignetteLikert,
    OpenTextShort,
    OpenTextLong,
    ImageChoiceSingle,
    ImageChoiceMulti,
    FileUpload,
    DateInput,
    ConsentCheckboxGroup,
    AttentionCheck,
    CaptchaPlaceholder,
    #[serde(other)]
    Unknown,
}

impl QuestionType {
    /// Whether legal answer values are drawn from the question's option list.
    pub fn uses_options(&self) -> bool {
        matches!(
            self,
            QuestionType::SingleChoice
                | QuestionType::MultiChoice
                | QuestionType::DropdownSingle
                | QuestionType::DropdownMulti
                | QuestionType::ForcedChoicePair
                | QuestionType::Likert5
                | QuestionType::Likert7
                | QuestionType::ScenarioSingle
                | QuestionType::ScenarioMulti
                | QuestionType::VignetteLikert
                | QuestionType::ImageChoiceSingle
                | QuestionType::ImageChoiceMulti
                | QuestionType::AttentionCheck
        )
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    pub value: String,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Check whether `value` is a legal answer for this question.
    ///
    /// Option-backed types accept only listed option values, unless the
    /// catalog defines no options for the question. Free-form types accept
    /// any value.
    pub fn accepts(&self, value: &str) -> bool {
        if !self.question_type.uses_options() || self.options.is_empty() {
            return true;
        }
        self.options.iter().any(|o| o.value == value)
    }
}

// ---------------------------------------------------------------------------
// Answer
// ---------------------------------------------------------------------------

/// One respondent response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub answer_value: String,
}

impl Answer {
    pub fn new(
        session_id: impl Into<SessionId>,
        question_id: impl Into<QuestionId>,
        answer_value: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            question_id: question_id.into(),
            answer_value: answer_value.into(),
        }
    }
}

/// Validate an answer submission before it is recorded.
pub fn validate_submission(session_id: &SessionId, answers: &[Answer]) -> Result<()> {
    if session_id.as_str().trim().is_empty() {
        return Err(VoteMatchError::InvalidInput("session id is required".to_string()));
    }
    if answers.is_empty() {
        return Err(VoteMatchError::InvalidInput("answers must not be empty".to_string()));
    }
    if let Some(a) = answers.iter().find(|a| &a.session_id != session_id) {
        return Err(VoteMatchError::InvalidInput(format!(
            "answer for question {} belongs to session {}, expected {}",
            a.question_id, a.session_id, session_id
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scoring rule
// ---------------------------------------------------------------------------

/// Maps one (question, answer value) pair to a signed contribution on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub question_id: QuestionId,
    pub answer_value: String,
    pub axis_id: AxisId,
    pub score_modifier: f64,
}

impl ScoringRule {
    pub fn new(
        question_id: impl Into<QuestionId>,
        answer_value: impl Into<String>,
        axis_id: impl Into<AxisId>,
        score_modifier: f64,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            answer_value: answer_value.into(),
            axis_id: axis_id.into(),
            score_modifier,
        }
    }
}

// ---------------------------------------------------------------------------
// Party
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    pub logo_url: Option<String>,
}

impl Party {
    pub fn new(
        id: impl Into<PartyId>,
        name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: short_name.into(),
            color: String::new(),
            description: String::new(),
            logo_url: None,
        }
    }
}

/// A party's curated stance on one axis, in [-100, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyPosition {
    pub party_id: PartyId,
    pub axis_id: AxisId,
    pub score: f64,
}

impl PartyPosition {
    pub fn new(party_id: impl Into<PartyId>, axis_id: impl Into<AxisId>, score: f64) -> Self {
        Self {
            party_id: party_id.into(),
            axis_id: axis_id.into(),
            score,
        }
    }
}

// ---------------------------------------------------------------------------
// Result snapshot
// ---------------------------------------------------------------------------

/// Immutable cache of one session's final result. Written once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub id: Uuid,
    pub session_id: SessionId,
    pub axis_scores: BTreeMap<AxisId, f64>,
    pub party_similarities: BTreeMap<PartyId, u8>,
    pub created_at: DateTime<Utc>,
}

impl ResultSnapshot {
    pub fn new(
        session_id: SessionId,
        axis_scores: BTreeMap<AxisId, f64>,
        party_similarities: BTreeMap<PartyId, u8>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            axis_scores,
            party_similarities,
            created_at: Utc::now(),
        }
    }
}
