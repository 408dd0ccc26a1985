//! Party similarity ranking.
//!
//! For each party, only axes where the party has a position are compared.
//! The average absolute difference over those axes becomes
//! `round(max(0, 100 - avg))`. A party with no comparable axes averages a
//! difference of 0 and therefore scores 100; callers should treat that as
//! uninformative rather than a genuine full match.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use votematch_common::{AxisId, Party, PartyId, PartyPosition};

use crate::normalise::{mean_abs_difference, similarity_from_difference};
use crate::scorer::AxisScoreVector;

/// Similarity of one party to the respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMatch {
    pub party_id: PartyId,
    pub similarity: u8,
    /// Number of axes that entered the average.
    pub compared_axes: usize,
}

impl PartyMatch {
    /// True when the party had no comparable axes.
    pub fn is_degenerate(&self) -> bool {
        self.compared_axes == 0
    }
}

/// Index positions by party. The first row for a (party, axis) pair wins.
pub(crate) fn index_positions(positions: &[PartyPosition]) -> HashMap<&PartyId, HashMap<&AxisId, f64>> {
    let mut by_party: HashMap<&PartyId, HashMap<&AxisId, f64>> = HashMap::new();
    for pos in positions {
        let axes = by_party.entry(&pos.party_id).or_default();
        if axes.contains_key(&pos.axis_id) {
            tracing::warn!(
                party_id = %pos.party_id,
                axis_id = %pos.axis_id,
                "Duplicate party position ignored"
            );
            continue;
        }
        axes.insert(&pos.axis_id, pos.score);
    }
    by_party
}

/// Similarity for a single party given its axis positions.
pub fn party_similarity(respondent: &AxisScoreVector, positions: &HashMap<&AxisId, f64>) -> (u8, usize) {
    let diffs: Vec<f64> = respondent
        .iter()
        .filter_map(|(axis_id, score)| positions.get(axis_id).map(|p| (score - p).abs()))
        .collect();
    (similarity_from_difference(mean_abs_difference(&diffs)), diffs.len())
}

/// Rank every party by similarity, descending. Ties keep catalog order.
pub fn match_parties(
    respondent: &AxisScoreVector,
    parties: &[Party],
    positions: &[PartyPosition],
) -> Vec<PartyMatch> {
    let by_party = index_positions(positions);
    let empty = HashMap::new();

    let mut matches: Vec<PartyMatch> = parties
        .iter()
        .map(|party| {
            let party_positions = by_party.get(&party.id).unwrap_or(&empty);
            let (similarity, compared_axes) = party_similarity(respondent, party_positions);
            PartyMatch {
                party_id: party.id.clone(),
                similarity,
                compared_axes,
            }
        })
        .collect();

    // stable: equal similarities stay in catalog order
    matches.sort_by(|a, b| b.similarity.cmp(&a.similarity));

    if let Some(best) = matches.first() {
        tracing::debug!(
            parties = matches.len(),
            best = %best.party_id,
            similarity = best.similarity,
            "Ranked parties"
        );
    }
    matches
}
