//! Session results with a write-once snapshot cache.
//!
//! Completing a session computes its result and stores it as a snapshot.
//! Reading results prefers the snapshot and falls back to a live
//! calculation when there is none, so a session can be viewed before it
//! is completed.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use votematch_common::SessionId;
use votematch_db::{DbError, SnapshotStore, SurveyRepository};

use crate::engine::{calculate_results, CalculationResult};
use crate::error::{RankerError, Result};
use crate::explain::{explain_match, Explanation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Snapshot,
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResults {
    pub source: ResultSource,
    #[serde(flatten)]
    pub result: CalculationResult,
}

#[derive(Clone)]
pub struct ResultService {
    repo: Arc<dyn SurveyRepository>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl ResultService {
    pub fn new(repo: Arc<dyn SurveyRepository>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self { repo, snapshots }
    }

    /// Compute and persist the session's result.
    ///
    /// A session that already has a snapshot returns it unchanged; a snapshot
    /// is never rewritten.
    pub async fn complete_session(&self, session_id: &SessionId) -> Result<SessionResults> {
        if let Some(existing) = self.stored(session_id).await? {
            tracing::info!(session_id = %session_id, "Session already completed");
            return Ok(existing);
        }

        let result = calculate_results(self.repo.as_ref(), session_id).await?;
        let snapshot = result.to_snapshot(session_id.clone());

        match self.snapshots.insert_snapshot(&snapshot).await {
            Ok(()) => {
                tracing::info!(
                    session_id = %session_id,
                    best = result.best_match().map(|p| p.party_id.as_str()).unwrap_or("-"),
                    "Stored result snapshot"
                );
                Ok(SessionResults {
                    source: ResultSource::Computed,
                    result,
                })
            }
            // a concurrent completion got there first
            Err(DbError::Duplicate(_)) => match self.stored(session_id).await? {
                Some(existing) => Ok(existing),
                None => Err(RankerError::Snapshot(DbError::NotFound(format!(
                    "result snapshot for session {session_id}"
                )))),
            },
            Err(e) => Err(RankerError::Snapshot(e)),
        }
    }

    /// The stored snapshot if present, otherwise a fresh calculation.
    ///
    /// A failing snapshot lookup is logged and treated as a miss.
    pub async fn get_results(&self, session_id: &SessionId) -> Result<SessionResults> {
        match self.stored(session_id).await {
            Ok(Some(existing)) => return Ok(existing),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Snapshot lookup failed, computing instead");
            }
        }

        let result = calculate_results(self.repo.as_ref(), session_id).await?;
        Ok(SessionResults {
            source: ResultSource::Computed,
            result,
        })
    }

    /// Explain the highest-ranked party that has positions on the
    /// respondent's axes. `None` when no party does.
    pub async fn explain_best_match(&self, session_id: &SessionId, top_n: usize) -> Result<Option<Explanation>> {
        let results = self.get_results(session_id).await?;
        Ok(results
            .result
            .best_informative_match()
            .map(|best| explain_match(best, &results.result.axes, top_n)))
    }

    async fn stored(&self, session_id: &SessionId) -> Result<Option<SessionResults>> {
        let Some(snapshot) = self
            .snapshots
            .find_snapshot(session_id)
            .await
            .map_err(RankerError::Snapshot)?
        else {
            return Ok(None);
        };

        let (axes, parties, positions) = tokio::try_join!(
            async { self.repo.fetch_axes().await.map_err(RankerError::upstream("axes")) },
            async { self.repo.fetch_parties().await.map_err(RankerError::upstream("parties")) },
            async {
                self.repo
                    .fetch_party_positions()
                    .await
                    .map_err(RankerError::upstream("party positions"))
            },
        )?;

        Ok(Some(SessionResults {
            source: ResultSource::Snapshot,
            result: CalculationResult::from_snapshot(&snapshot, &axes, &parties, &positions),
        }))
    }
}
