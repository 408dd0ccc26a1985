//! Calculation engine: fetch inputs, score axes, rank parties, shape output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use votematch_common::{
    Answer, Axis, AxisId, Party, PartyId, PartyPosition, ResultSnapshot, ScoringRule, SessionId,
};
use votematch_db::SurveyRepository;

use crate::error::{RankerError, Result};
use crate::matcher::{index_positions, match_parties};
use crate::scorer::compute_axis_scores;

/// Everything one calculation reads, as plain in-memory values.
#[derive(Debug, Clone, Default)]
pub struct ScoringInputs {
    pub axes: Vec<Axis>,
    pub scoring_rules: Vec<ScoringRule>,
    pub answers: Vec<Answer>,
    pub parties: Vec<Party>,
    pub party_positions: Vec<PartyPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScore {
    pub axis_id: AxisId,
    pub axis_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySimilarity {
    pub party_id: PartyId,
    pub party_name: String,
    pub party_short_name: String,
    pub similarity: u8,
    /// Axes that entered the average. Zero means the similarity carries no information.
    pub compared_axes: usize,
}

impl PartySimilarity {
    pub fn is_degenerate(&self) -> bool {
        self.compared_axes == 0
    }
}

/// The combined result for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub axis_scores: BTreeMap<AxisId, f64>,
    pub party_similarities: BTreeMap<PartyId, u8>,
    /// Axis scores in display order.
    pub axes: Vec<AxisScore>,
    /// Parties by similarity descending; the first entry is the best match.
    pub parties: Vec<PartySimilarity>,
}

impl CalculationResult {
    pub fn best_match(&self) -> Option<&PartySimilarity> {
        self.parties.first()
    }

    /// Highest-ranked party that shares at least one axis with the respondent.
    pub fn best_informative_match(&self) -> Option<&PartySimilarity> {
        self.parties.iter().find(|p| !p.is_degenerate())
    }

    /// The two maps that make up a persisted snapshot.
    pub fn to_snapshot(&self, session_id: SessionId) -> ResultSnapshot {
        ResultSnapshot::new(
            session_id,
            self.axis_scores.clone(),
            self.party_similarities.clone(),
        )
    }

    /// Rebuild display lists from a stored snapshot.
    ///
    /// Scores come from the snapshot; names and compared-axis counts come
    /// from the current catalog. Snapshot entries whose axis or party has
    /// since left the catalog stay in the maps but are dropped from the lists.
    pub fn from_snapshot(
        snapshot: &ResultSnapshot,
        axes: &[Axis],
        parties: &[Party],
        positions: &[PartyPosition],
    ) -> Self {
        let by_party = index_positions(positions);
        let axis_list = axes
            .iter()
            .filter_map(|axis| {
                snapshot.axis_scores.get(&axis.id).map(|score| AxisScore {
                    axis_id: axis.id.clone(),
                    axis_name: axis.name.clone(),
                    score: *score,
                })
            })
            .collect();

        let mut party_list: Vec<PartySimilarity> = parties
            .iter()
            .filter_map(|party| {
                snapshot
                    .party_similarities
                    .get(&party.id)
                    .map(|similarity| {
                        let compared_axes = by_party
                            .get(&party.id)
                            .map(|axes| {
                                axes.keys()
                                    .filter(|a| snapshot.axis_scores.contains_key(**a))
                                    .count()
                            })
                            .unwrap_or(0);
                        party_entry(party, *similarity, compared_axes)
                    })
            })
            .collect();
        party_list.sort_by(|a, b| b.similarity.cmp(&a.similarity));

        Self {
            axis_scores: snapshot.axis_scores.clone(),
            party_similarities: snapshot.party_similarities.clone(),
            axes: axis_list,
            parties: party_list,
        }
    }
}

fn party_entry(party: &Party, similarity: u8, compared_axes: usize) -> PartySimilarity {
    PartySimilarity {
        party_id: party.id.clone(),
        party_name: party.name.clone(),
        party_short_name: party.short_name.clone(),
        similarity,
        compared_axes,
    }
}

/// Pure calculation over in-memory inputs.
pub fn calculate(inputs: &ScoringInputs) -> CalculationResult {
    let scores = compute_axis_scores(&inputs.axes, &inputs.scoring_rules, &inputs.answers);
    let matches = match_parties(&scores, &inputs.parties, &inputs.party_positions);

    let axes = inputs
        .axes
        .iter()
        .map(|axis| AxisScore {
            axis_id: axis.id.clone(),
            axis_name: axis.name.clone(),
            score: scores.get(&axis.id).unwrap_or(0.0),
        })
        .collect();

    // matches are already ranked; join names back in
    let by_id: BTreeMap<&PartyId, &Party> = inputs.parties.iter().map(|p| (&p.id, p)).collect();
    let parties: Vec<PartySimilarity> = matches
        .iter()
        .filter_map(|m| by_id.get(&m.party_id).map(|p| party_entry(p, m.similarity, m.compared_axes)))
        .collect();

    let party_similarities = matches
        .iter()
        .map(|m| (m.party_id.clone(), m.similarity))
        .collect();

    CalculationResult {
        axis_scores: scores.into_map(),
        party_similarities,
        axes,
        parties,
    }
}

/// Fetch all five inputs for a session concurrently.
///
/// Any failed fetch fails the whole load; there is no partial result.
pub async fn load_inputs(repo: &dyn SurveyRepository, session_id: &SessionId) -> Result<ScoringInputs> {
    let (axes, scoring_rules, answers, parties, party_positions) = tokio::try_join!(
        async { repo.fetch_axes().await.map_err(RankerError::upstream("axes")) },
        async { repo.fetch_scoring_rules().await.map_err(RankerError::upstream("scoring rules")) },
        async { repo.fetch_answers(session_id).await.map_err(RankerError::upstream("answers")) },
        async { repo.fetch_parties().await.map_err(RankerError::upstream("parties")) },
        async { repo.fetch_party_positions().await.map_err(RankerError::upstream("party positions")) },
    )?;

    Ok(ScoringInputs {
        axes,
        scoring_rules,
        answers,
        parties,
        party_positions,
    })
}

/// Load inputs for `session_id` and calculate its result.
pub async fn calculate_results(repo: &dyn SurveyRepository, session_id: &SessionId) -> Result<CalculationResult> {
    let inputs = load_inputs(repo, session_id).await?;
    let result = calculate(&inputs);
    tracing::debug!(
        session_id = %session_id,
        answers = inputs.answers.len(),
        axes = result.axes.len(),
        parties = result.parties.len(),
        "Calculated session result"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use votematch_test_utils::{answers, CatalogBuilder};

    fn inputs_from(catalog: votematch_common::Catalog, answers: Vec<Answer>) -> ScoringInputs {
        ScoringInputs {
            axes: catalog.axes,
            scoring_rules: catalog.scoring_rules,
            answers,
            parties: catalog.parties,
            party_positions: catalog.party_positions,
        }
    }

    #[test]
    fn test_economy_scenario() {
        let catalog = CatalogBuilder::new()
            .axis("economy", "Economy")
            .rule("q1", "market", "economy", 50.0)
            .rule("q1", "state", "economy", -50.0)
            .party("p1", "Party One", "P1")
            .party("p2", "Party Two", "P2")
            .position("p1", "economy", 50.0)
            .position("p2", "economy", -50.0)
            .build();
        let result = calculate(&inputs_from(catalog, answers("s", &[("q1", "market")])));

        assert_eq!(result.axis_scores.get(&AxisId::new("economy")), Some(&50.0));
        assert_eq!(result.party_similarities.get(&PartyId::new("p1")), Some(&100));
        assert_eq!(result.party_similarities.get(&PartyId::new("p2")), Some(&0));
        let ranking: Vec<&str> = result.parties.iter().map(|p| p.party_id.as_str()).collect();
        assert_eq!(ranking, vec!["p1", "p2"]);
        assert_eq!(result.best_match().map(|p| p.party_short_name.as_str()), Some("P1"));
        assert_eq!(result.parties[0].compared_axes, 1);
        assert_eq!(
            result.axes,
            vec![AxisScore {
                axis_id: AxisId::new("economy"),
                axis_name: "Economy".to_string(),
                score: 50.0,
            }]
        );
    }

    #[test]
    fn test_empty_catalog_is_trivial_not_an_error() {
        let result = calculate(&ScoringInputs::default());
        assert!(result.axis_scores.is_empty());
        assert!(result.party_similarities.is_empty());
        assert!(result.axes.is_empty());
        assert!(result.parties.is_empty());
        assert!(result.best_match().is_none());
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let catalog = CatalogBuilder::new()
            .axis("economy", "Economy")
            .party("p1", "Party One", "P1")
            .build();
        let result = calculate(&inputs_from(catalog, vec![]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["axisScores"]["economy"], 0.0);
        assert_eq!(json["partySimilarities"]["p1"], 100);
        assert_eq!(json["axes"][0]["axisName"], "Economy");
        assert_eq!(json["parties"][0]["partyShortName"], "P1");
        assert_eq!(json["parties"][0]["comparedAxes"], 0);
    }

    #[test]
    fn test_unpositioned_party_ranks_first_but_is_flagged() {
        let catalog = votematch_test_utils::sample_catalog();
        let result = calculate(&inputs_from(catalog, answers("s", &[("q1", "market"), ("q3", "agree")])));

        let best = result.best_match().unwrap();
        assert_eq!(best.party_id.as_str(), "empty");
        assert!(best.is_degenerate());

        let informative = result.best_informative_match().unwrap();
        assert_eq!(informative.party_id.as_str(), "liberal");
        assert_eq!(informative.compared_axes, 3);
        assert_eq!(informative.similarity, 93);
    }

    #[test]
    fn test_no_informative_match_when_no_positions() {
        let catalog = CatalogBuilder::new()
            .axis("economy", "Economy")
            .party("p1", "Party One", "P1")
            .build();
        let result = calculate(&inputs_from(catalog, vec![]));
        assert!(result.best_match().is_some());
        assert!(result.best_informative_match().is_none());
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_ranking() {
        let catalog = votematch_test_utils::sample_catalog();
        let result = calculate(&inputs_from(
            catalog.clone(),
            answers("s", &[("q1", "market"), ("q3", "agree")]),
        ));
        let snapshot = result.to_snapshot(SessionId::new("s"));
        let rebuilt = CalculationResult::from_snapshot(
            &snapshot,
            &catalog.axes,
            &catalog.parties,
            &catalog.party_positions,
        );
        assert_eq!(rebuilt, result);
    }

    #[test]
    fn test_from_snapshot_drops_entries_missing_from_catalog() {
        let catalog = votematch_test_utils::sample_catalog();
        let result = calculate(&inputs_from(catalog.clone(), vec![]));
        let snapshot = result.to_snapshot(SessionId::new("s"));

        let axes: Vec<Axis> = catalog.axes.iter().skip(1).cloned().collect();
        let parties: Vec<Party> = catalog.parties.iter().skip(1).cloned().collect();
        let rebuilt = CalculationResult::from_snapshot(&snapshot, &axes, &parties, &catalog.party_positions);

        assert_eq!(rebuilt.axes.len(), catalog.axes.len() - 1);
        assert_eq!(rebuilt.parties.len(), catalog.parties.len() - 1);
        assert_eq!(rebuilt.axis_scores, snapshot.axis_scores);
        assert_eq!(rebuilt.party_similarities, snapshot.party_similarities);
    }
}
