//! Axis score computation.
//!
//! Every known axis starts at 0, each answer adds the modifiers of all rules
//! matching its (question, value) pair, and the totals are clamped to
//! [-100, 100]. Each axis sums its matched modifiers in sorted order, so
//! answer order never changes the result, even for fractional modifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use votematch_common::{Answer, Axis, AxisId, ScoringRule};

use crate::normalise::clamp_axis_score;
use crate::rule_index::RuleIndex;

/// A respondent's clamped position on every known axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisScoreVector(BTreeMap<AxisId, f64>);

impl AxisScoreVector {
    pub fn get(&self, axis_id: &AxisId) -> Option<f64> {
        self.0.get(axis_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AxisId, f64)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<AxisId, f64> {
        &self.0
    }

    pub fn into_map(self) -> BTreeMap<AxisId, f64> {
        self.0
    }
}

impl From<BTreeMap<AxisId, f64>> for AxisScoreVector {
    fn from(map: BTreeMap<AxisId, f64>) -> Self {
        Self(map)
    }
}

/// Score `answers` against the rule table. See the module docs.
pub fn compute_axis_scores(axes: &[Axis], rules: &[ScoringRule], answers: &[Answer]) -> AxisScoreVector {
    let index = RuleIndex::build(rules);
    score_with_index(axes, &index, answers)
}

/// Same as [`compute_axis_scores`] with a prebuilt index.
///
/// Rules that point at an axis missing from `axes` are ignored; the output
/// holds exactly one entry per known axis.
pub fn score_with_index(axes: &[Axis], index: &RuleIndex, answers: &[Answer]) -> AxisScoreVector {
    let mut contributions: BTreeMap<AxisId, Vec<f64>> =
        axes.iter().map(|a| (a.id.clone(), Vec::new())).collect();

    let mut matched = 0usize;
    for answer in answers {
        for effect in index.lookup(&answer.question_id, &answer.answer_value) {
            // unknown axis: no effect
            if let Some(modifiers) = contributions.get_mut(&effect.axis_id) {
                modifiers.push(effect.score_modifier);
                matched += 1;
            }
        }
    }

    tracing::debug!(
        axes = axes.len(),
        rules = index.len(),
        answers = answers.len(),
        matched,
        "Computed axis scores"
    );

    let totals = contributions
        .into_iter()
        .map(|(axis_id, modifiers)| (axis_id, clamp_axis_score(canonical_sum(modifiers))))
        .collect();
    AxisScoreVector(totals)
}

/// Sum in sorted order so the result does not depend on answer order.
fn canonical_sum(mut modifiers: Vec<f64>) -> f64 {
    modifiers.sort_by(f64::total_cmp);
    modifiers.iter().fold(0.0, |total, m| total + m)
}
