//! Shared fixtures for votematch tests.
//!
//! [`CatalogBuilder`] assembles small catalogs inline; [`sample_catalog`]
//! is a fixed three-axis, four-party catalog used by the integration tests.

use votematch_common::{
    Answer, Axis, Catalog, Party, PartyPosition, Question, QuestionOption, QuestionType,
    ScoringRule, SessionId,
};

/// Fluent builder for test catalogs. Axes get `order_index` in insertion order.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(mut self, id: &str, name: &str) -> Self {
        let mut axis = Axis::new(id, name);
        axis.slug = id.to_string();
        axis.order_index = self.catalog.axes.len() as i32 + 1;
        self.catalog.axes.push(axis);
        self
    }

    /// A single-choice question whose options are `values`.
    pub fn question(mut self, id: &str, values: &[&str]) -> Self {
        let order_index = self.catalog.questions.len() as i32 + 1;
        self.catalog.questions.push(Question {
            id: id.into(),
            text: format!("Question {id}"),
            question_type: QuestionType::SingleChoice,
            description: None,
            required: true,
            order_index,
            options: values
                .iter()
                .enumerate()
                .map(|(i, v)| QuestionOption {
                    text: v.to_string(),
                    value: v.to_string(),
                    order_index: i as i32 + 1,
                })
                .collect(),
        });
        self
    }

    pub fn rule(mut self, question: &str, value: &str, axis: &str, modifier: f64) -> Self {
        self.catalog
            .scoring_rules
            .push(ScoringRule::new(question, value, axis, modifier));
        self
    }

    pub fn party(mut self, id: &str, name: &str, short_name: &str) -> Self {
        self.catalog.parties.push(Party::new(id, name, short_name));
        self
    }

    pub fn position(mut self, party: &str, axis: &str, score: f64) -> Self {
        self.catalog
            .party_positions
            .push(PartyPosition::new(party, axis, score));
        self
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}

/// Answer rows for one session from `(question, value)` pairs.
pub fn answers(session: &str, pairs: &[(&str, &str)]) -> Vec<Answer> {
    pairs
        .iter()
        .map(|(q, v)| Answer::new(session, *q, *v))
        .collect()
}

pub fn session(id: &str) -> SessionId {
    SessionId::new(id)
}

/// Three axes, three questions and four parties.
///
/// Question `q1` moves economy, `q2` moves welfare, and `q3` moves both
/// economy and secularism from a single answer. Party `empty` has no
/// positions at all.
pub fn sample_catalog() -> Catalog {
    CatalogBuilder::new()
        .axis("economy", "Economy: market vs state")
        .axis("welfare", "Education and social policy")
        .axis("secularism", "Secularism")
        .question("q1", &["market", "state", "mixed"])
        .question("q2", &["free_healthcare", "universal_education", "social_welfare", "minimum_wage"])
        .question("q3", &["agree", "disagree"])
        .rule("q1", "market", "economy", 50.0)
        .rule("q1", "state", "economy", -50.0)
        .rule("q1", "mixed", "economy", 0.0)
        .rule("q2", "free_healthcare", "welfare", -30.0)
        .rule("q2", "universal_education", "welfare", -30.0)
        .rule("q2", "social_welfare", "welfare", -30.0)
        .rule("q2", "minimum_wage", "welfare", -30.0)
        .rule("q3", "agree", "economy", 20.0)
        .rule("q3", "agree", "secularism", 40.0)
        .rule("q3", "disagree", "secularism", -40.0)
        .party("liberal", "Liberal Party", "LIB")
        .party("labour", "Labour Party", "LAB")
        .party("green", "Green Party", "GRN")
        .party("empty", "Unpositioned Party", "UNP")
        .position("liberal", "economy", 70.0)
        .position("liberal", "welfare", 20.0)
        .position("liberal", "secularism", 40.0)
        .position("labour", "economy", -60.0)
        .position("labour", "welfare", -80.0)
        .position("labour", "secularism", 30.0)
        .position("green", "economy", -20.0)
        .position("green", "welfare", -50.0)
        .build()
}
