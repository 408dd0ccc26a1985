//! votematch data-access layer
//!
//! The scoring core never talks to storage directly. This crate defines the
//! capabilities it is handed instead:
//!
//! - [`SurveyRepository`]: read-only catalog tables plus a session's answers
//! - [`AnswerRepository`]: recording answers for a session
//! - [`SnapshotStore`]: write-once result snapshots
//!
//! [`InMemoryStore`] implements all three over a [`Catalog`] loaded from a
//! YAML or JSON seed file.
//!
//! # Example
//!
//! ```rust,no_run
//! use votematch_db::{Catalog, CatalogExt, InMemoryStore, SurveyRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::from_path("./data/catalog.yaml")?;
//!     let store = InMemoryStore::new(catalog);
//!     let axes = store.fetch_axes().await?;
//!     println!("{} axes", axes.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod memory;
pub mod repository;

pub use catalog::{load_catalog, Catalog, CatalogExt};
pub use error::{DbError, Result};
pub use memory::InMemoryStore;
pub use repository::{AnswerRepository, SnapshotStore, SurveyRepository};
