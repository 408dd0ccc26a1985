//! Data-access capabilities handed to the scoring core.
//!
//! Each fetch is independent, so callers may issue them concurrently.

use async_trait::async_trait;
use votematch_common::{
    Answer, Axis, Party, PartyPosition, Question, ResultSnapshot, ScoringRule, SessionId,
};

use crate::error::Result;

/// Read access to the survey catalog and a session's answers.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// All axes, in display order.
    async fn fetch_axes(&self) -> Result<Vec<Axis>>;

    /// The full scoring-rule table.
    async fn fetch_scoring_rules(&self) -> Result<Vec<ScoringRule>>;

    /// Every answer row recorded for `session_id`. Unknown sessions yield
    /// an empty list.
    async fn fetch_answers(&self, session_id: &SessionId) -> Result<Vec<Answer>>;

    /// All parties, in catalog order.
    async fn fetch_parties(&self) -> Result<Vec<Party>>;

    /// The full party-position table.
    async fn fetch_party_positions(&self) -> Result<Vec<PartyPosition>>;

    /// Questions with their options, ordered by `order_index`.
    async fn fetch_questions(&self) -> Result<Vec<Question>>;
}

/// Write access for answer submissions.
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Append answers for a session. Returns the number of rows stored.
    async fn record_answers(&self, session_id: &SessionId, answers: &[Answer]) -> Result<usize>;
}

/// Write-once storage for result snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn find_snapshot(&self, session_id: &SessionId) -> Result<Option<ResultSnapshot>>;

    /// Store a snapshot. Fails with `DbError::Duplicate` if the session
    /// already has one; existing snapshots are never overwritten.
    async fn insert_snapshot(&self, snapshot: &ResultSnapshot) -> Result<()>;
}
