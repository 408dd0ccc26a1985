//! votematch-common: Shared types and errors used across all votematch crates.

pub mod error;
pub mod ids;
pub mod entities;
pub mod catalog;

// Re-export commonly used types
pub use catalog::{Catalog, DanglingReferences};
pub use entities::{
    validate_submission, Answer, Axis, Party, PartyPosition, Question, QuestionOption,
    QuestionType, ResultSnapshot, ScoringRule,
};
pub use error::{Result, VoteMatchError};
pub use ids::{AxisId, PartyId, QuestionId, SessionId};
