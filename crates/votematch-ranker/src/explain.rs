//! Human-readable explanation of a match.

use serde::{Deserialize, Serialize};
use votematch_common::PartyId;

use crate::engine::{AxisScore, PartySimilarity};

/// Why a party matched: its similarity plus the respondent's strongest axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub party_id: PartyId,
    pub party_name: String,
    pub similarity: u8,
    pub top_axes: Vec<AxisScore>,
    pub text: String,
}

/// The `n` axes with the largest absolute score. Equal magnitudes keep
/// their input order.
pub fn top_axes(axes: &[AxisScore], n: usize) -> Vec<AxisScore> {
    let mut sorted = axes.to_vec();
    sorted.sort_by(|a, b| b.score.abs().total_cmp(&a.score.abs()));
    sorted.truncate(n);
    sorted
}

pub fn explain_match(party: &PartySimilarity, axes: &[AxisScore], n: usize) -> Explanation {
    let top = top_axes(axes, n);

    let mut text = format!("Your views are {}% similar to {}", party.similarity, party.party_name);
    if top.is_empty() {
        text.push('.');
    } else {
        let names: Vec<&str> = top.iter().map(|a| a.axis_name.as_str()).collect();
        text.push_str(&format!(", especially on {}.", names.join(", ")));
    }

    Explanation {
        party_id: party.party_id.clone(),
        party_name: party.party_name.clone(),
        similarity: party.similarity,
        top_axes: top,
        text,
    }
}
