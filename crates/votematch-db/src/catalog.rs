//! Catalog seed-file loading.
//!
//! The catalog format is chosen by file extension: `.yaml`/`.yml` or `.json`.

use std::path::Path;

use crate::error::{DbError, Result};
pub use votematch_common::Catalog;

/// Parse a catalog from YAML text.
pub fn from_yaml_str(content: &str) -> Result<Catalog> {
    Ok(serde_yaml::from_str(content)?)
}

/// Parse a catalog from JSON text.
pub fn from_json_str(content: &str) -> Result<Catalog> {
    Ok(serde_json::from_str(content)?)
}

/// Load a catalog file, logging any rows that reference unknown ids.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let content = std::fs::read_to_string(path)?;
    let catalog = match ext.as_str() {
        "yaml" | "yml" => from_yaml_str(&content)?,
        "json" => from_json_str(&content)?,
        other => return Err(DbError::UnsupportedFormat(other.to_string())),
    };

    let dangling = catalog.dangling_references();
    if !dangling.is_empty() {
        tracing::warn!(
            path = %path.display(),
            rules_unknown_question = dangling.rules_unknown_question,
            rules_unknown_axis = dangling.rules_unknown_axis,
            positions_unknown_party = dangling.positions_unknown_party,
            positions_unknown_axis = dangling.positions_unknown_axis,
            "Catalog has dangling references; they will have no effect on scoring"
        );
    }

    tracing::info!(
        path = %path.display(),
        axes = catalog.axes.len(),
        questions = catalog.questions.len(),
        rules = catalog.scoring_rules.len(),
        parties = catalog.parties.len(),
        positions = catalog.party_positions.len(),
        "Loaded survey catalog"
    );

    Ok(catalog)
}

/// Extension methods so callers can write `Catalog::from_path(..)`.
pub trait CatalogExt: Sized {
    fn from_path(path: impl AsRef<Path>) -> Result<Self>;
}

impl CatalogExt for Catalog {
    fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        load_catalog(path)
    }
}
