//! Configuration loading for votematch.
//! Reads votematch.toml from the current directory or the path in the
//! VOTEMATCH_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV_VAR: &str = "VOTEMATCH_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "votematch.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of the survey catalog seed file (YAML or JSON, by extension).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String { "./data/catalog.yaml".to_string() }

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Number of axes quoted in a match explanation.
    #[serde(default = "default_explanation_top_axes")]
    pub explanation_top_axes: usize,
}

fn default_explanation_top_axes() -> usize { 3 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { explanation_top_axes: default_explanation_top_axes() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}


impl Config {
    /// Resolve the config path: VOTEMATCH_CONFIG first, then the current directory.
    pub fn path() -> String {
        std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Load configuration from votematch.toml.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Self::path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy votematch.example.toml to votematch.toml and edit it.",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Like [`Config::load`], but falls back to defaults when no file exists.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let path = Self::path();
        if !Path::new(&path).exists() {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }
}
