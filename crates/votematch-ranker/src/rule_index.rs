//! Lookup of scoring rules by (question, answer value).
//!
//! Built once per invocation so that scoring is linear in the number of
//! answers instead of answers × rules.

use std::collections::HashMap;
use votematch_common::{AxisId, QuestionId, ScoringRule};

/// One axis effect of a matched rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEffect {
    pub axis_id: AxisId,
    pub score_modifier: f64,
}

#[derive(Debug, Default)]
pub struct RuleIndex {
    by_question: HashMap<QuestionId, HashMap<String, Vec<RuleEffect>>>,
    len: usize,
}

impl RuleIndex {
    pub fn build(rules: &[ScoringRule]) -> Self {
        let mut index = Self::default();
        for rule in rules {
            if !rule.score_modifier.is_finite() {
                tracing::warn!(
                    question_id = %rule.question_id,
                    answer_value = %rule.answer_value,
                    axis_id = %rule.axis_id,
                    "Skipping scoring rule with non-finite modifier"
                );
                continue;
            }
            index
                .by_question
                .entry(rule.question_id.clone())
                .or_default()
                .entry(rule.answer_value.clone())
                .or_default()
                .push(RuleEffect {
                    axis_id: rule.axis_id.clone(),
                    score_modifier: rule.score_modifier,
                });
            index.len += 1;
        }
        index
    }

    /// Every effect whose rule matches the pair exactly. Empty if none.
    pub fn lookup(&self, question_id: &QuestionId, answer_value: &str) -> &[RuleEffect] {
        self.by_question
            .get(question_id)
            .and_then(|values| values.get(answer_value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of indexed rules.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
