//! HTTP handlers for all API routes.

pub mod answers;
pub mod complete;
pub mod health;
pub mod questions;
pub mod results;
