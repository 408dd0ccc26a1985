//! votematch-web: HTTP API for the survey
//!
//! Routes:
//!   - `GET  /api/questions`                         questions with options
//!   - `POST /api/answers`                           record a session's answers
//!   - `POST /api/complete`                          compute and store the result
//!   - `GET  /api/results/{session_id}`              stored or live result
//!   - `GET  /api/results/{session_id}/explanation`  best-match rationale
//!   - `GET  /health`

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, SharedState};
