//! The read-only survey catalog supplied by the surrounding application.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::entities::{Axis, Party, PartyPosition, Question, ScoringRule};
use crate::ids::{AxisId, PartyId, QuestionId};

/// Every catalog table the scoring core reads, in one bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub axes: Vec<Axis>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub scoring_rules: Vec<ScoringRule>,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub party_positions: Vec<PartyPosition>,
}

/// Counts of rows that reference ids missing from the catalog.
///
/// Dangling references are legal: the scorer treats them as "no effect".
/// This report exists so loaders can log stale or partially-migrated data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DanglingReferences {
    pub rules_unknown_question: usize,
    pub rules_unknown_axis: usize,
    pub positions_unknown_party: usize,
    pub positions_unknown_axis: usize,
}

impl DanglingReferences {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Catalog {
    pub fn dangling_references(&self) -> DanglingReferences {
        let axes: HashSet<&AxisId> = self.axes.iter().map(|a| &a.id).collect();
        let questions: HashSet<&QuestionId> = self.questions.iter().map(|q| &q.id).collect();
        let parties: HashSet<&PartyId> = self.parties.iter().map(|p| &p.id).collect();

        DanglingReferences {
            rules_unknown_question: self
                .scoring_rules
                .iter()
                .filter(|r| !questions.contains(&r.question_id))
                .count(),
            rules_unknown_axis: self
                .scoring_rules
                .iter()
                .filter(|r| !axes.contains(&r.axis_id))
                .count(),
            positions_unknown_party: self
                .party_positions
                .iter()
                .filter(|p| !parties.contains(&p.party_id))
                .count(),
            positions_unknown_axis: self
                .party_positions
                .iter()
                .filter(|p| !axes.contains(&p.axis_id))
                .count(),
        }
    }
}
