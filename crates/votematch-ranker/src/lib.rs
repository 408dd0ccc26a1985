//! votematch-ranker: Axis scoring and party matching engine.
//!
//! Two stateless stages: the axis scorer folds a respondent's answers through
//! the scoring-rule table into one clamped score per axis, and the party
//! matcher ranks every party by average absolute distance to that vector.
//! [`engine`] wires both to the data-access traits; [`results`] adds the
//! write-once snapshot cache on top.

pub mod error;
pub mod normalise;
pub mod rule_index;
pub mod scorer;
pub mod matcher;
pub mod explain;
pub mod engine;
pub mod results;

pub use engine::{calculate, calculate_results, load_inputs, AxisScore, CalculationResult, PartySimilarity, ScoringInputs};
pub use error::{RankerError, Result};
pub use explain::{explain_match, top_axes, Explanation};
pub use matcher::{match_parties, PartyMatch};
pub use results::{ResultService, ResultSource, SessionResults};
pub use rule_index::RuleIndex;
pub use scorer::{compute_axis_scores, AxisScoreVector};
