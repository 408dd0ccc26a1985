//! In-memory store backed by a loaded [`Catalog`].
//!
//! Catalog tables are immutable after construction; answers and snapshots
//! live behind async locks and are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use votematch_common::{
    validate_submission, Answer, Axis, Catalog, Party, PartyPosition, Question, ResultSnapshot,
    ScoringRule, SessionId,
};

use crate::error::{DbError, Result};
use crate::repository::{AnswerRepository, SnapshotStore, SurveyRepository};

#[derive(Clone)]
pub struct InMemoryStore {
    catalog: Arc<Catalog>,
    answers: Arc<RwLock<HashMap<SessionId, Vec<Answer>>>>,
    snapshots: Arc<RwLock<HashMap<SessionId, ResultSnapshot>>>,
}

impl InMemoryStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            answers: Arc::new(RwLock::new(HashMap::new())),
            snapshots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build a store with pre-recorded answers, bypassing submission validation.
    pub fn with_answers(catalog: Catalog, answers: impl IntoIterator<Item = Answer>) -> Self {
        let mut map: HashMap<SessionId, Vec<Answer>> = HashMap::new();
        for a in answers {
            map.entry(a.session_id.clone()).or_default().push(a);
        }
        Self {
            catalog: Arc::new(catalog),
            answers: Arc::new(RwLock::new(map)),
            snapshots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn snapshot_count(&self) -> usize {
        self.snapshots.read().await.len()
    }
}

#[async_trait]
impl SurveyRepository for InMemoryStore {
    async fn fetch_axes(&self) -> Result<Vec<Axis>> {
        let mut axes = self.catalog.axes.clone();
        axes.sort_by_key(|a| a.order_index);
        Ok(axes)
    }

    async fn fetch_scoring_rules(&self) -> Result<Vec<ScoringRule>> {
        Ok(self.catalog.scoring_rules.clone())
    }

    async fn fetch_answers(&self, session_id: &SessionId) -> Result<Vec<Answer>> {
        Ok(self
            .answers
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_parties(&self) -> Result<Vec<Party>> {
        Ok(self.catalog.parties.clone())
    }

    async fn fetch_party_positions(&self) -> Result<Vec<PartyPosition>> {
        Ok(self.catalog.party_positions.clone())
    }

    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        let mut questions = self.catalog.questions.clone();
        questions.sort_by_key(|q| q.order_index);
        for q in &mut questions {
            q.options.sort_by_key(|o| o.order_index);
        }
        Ok(questions)
    }
}

#[async_trait]
impl AnswerRepository for InMemoryStore {
    async fn record_answers(&self, session_id: &SessionId, answers: &[Answer]) -> Result<usize> {
        validate_submission(session_id, answers)?;

        let mut map = self.answers.write().await;
        map.entry(session_id.clone())
            .or_default()
            .extend(answers.iter().cloned());

        tracing::debug!(session_id = %session_id, count = answers.len(), "Recorded answers");
        Ok(answers.len())
    }
}

#[async_trait]
impl SnapshotStore for InMemoryStore {
    async fn find_snapshot(&self, session_id: &SessionId) -> Result<Option<ResultSnapshot>> {
        Ok(self.snapshots.read().await.get(session_id).cloned())
    }

    async fn insert_snapshot(&self, snapshot: &ResultSnapshot) -> Result<()> {
        let mut map = self.snapshots.write().await;
        if map.contains_key(&snapshot.session_id) {
            return Err(DbError::Duplicate(format!(
                "result snapshot for session {}",
                snapshot.session_id
            )));
        }
        map.insert(snapshot.session_id.clone(), snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use votematch_common::{AxisId, QuestionOption, QuestionType};

    fn catalog() -> Catalog {
        let mut second = Axis::new("secularism", "Secularism");
        second.order_index = 2;
        let mut first = Axis::new("economy", "Economy");
        first.order_index = 1;

        Catalog {
            axes: vec![second, first],
            questions: vec![Question {
                id: "q1".into(),
                text: "Who decides?".to_string(),
                question_type: QuestionType::SingleChoice,
                description: None,
                required: true,
                order_index: 1,
                options: vec![
                    QuestionOption { text: "State".to_string(), value: "state".to_string(), order_index: 2 },
                    QuestionOption { text: "Market".to_string(), value: "market".to_string(), order_index: 1 },
                ],
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_axes_and_options_sorted_for_display() {
        let store = InMemoryStore::new(catalog());
        let axes = store.fetch_axes().await.unwrap();
        let ids: Vec<&str> = axes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["economy", "secularism"]);

        let questions = store.fetch_questions().await.unwrap();
        assert_eq!(questions[0].options[0].value, "market");
    }

    #[tokio::test]
    async fn test_record_answers_appends() {
        let store = InMemoryStore::new(catalog());
        let session = SessionId::new("s1");

        let n = store
            .record_answers(&session, &[Answer::new("s1", "q1", "market")])
            .await
            .unwrap();
        assert_eq!(n, 1);
        store
            .record_answers(&session, &[Answer::new("s1", "q1", "market")])
            .await
            .unwrap();

        // Duplicates are kept; the scorer decides what they mean.
        assert_eq!(store.fetch_answers(&session).await.unwrap().len(), 2);
        assert!(store.fetch_answers(&SessionId::new("other")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_answers_rejects_empty_submission() {
        let store = InMemoryStore::new(catalog());
        let err = store.record_answers(&SessionId::new("s1"), &[]).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_snapshot_is_write_once() {
        let store = InMemoryStore::new(catalog());
        let session = SessionId::new("s1");
        let mut axes = BTreeMap::new();
        axes.insert(AxisId::new("economy"), 50.0);

        let first = ResultSnapshot::new(session.clone(), axes.clone(), BTreeMap::new());
        store.insert_snapshot(&first).await.unwrap();

        let second = ResultSnapshot::new(session.clone(), BTreeMap::new(), BTreeMap::new());
        let err = store.insert_snapshot(&second).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)));

        let stored = store.find_snapshot(&session).await.unwrap().unwrap();
        assert_eq!(stored, first);
        assert_eq!(store.snapshot_count().await, 1);
    }
}
