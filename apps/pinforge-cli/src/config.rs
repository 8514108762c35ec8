//! CLI configuration.
//!
//! Loaded from, in increasing priority: built-in defaults, an optional TOML
//! file, and `PINFORGE__*` environment variables.
//!
//! ```toml
//! catalog_dir = "./pricing"
//! exemption_boundary = "exclusive"
//! output = "json"
//! log_level = "debug"
//! ```

use pinforge_core::ExemptionBoundary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment prefix, e.g. `PINFORGE__OUTPUT=json`.
pub const ENV_PREFIX: &str = "PINFORGE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory holding `pins.json` / `coins.json` overrides.
    pub catalog_dir: Option<PathBuf>,

    /// Overrides the catalog's exemption boundary when set.
    pub exemption_boundary: Option<ExemptionBoundary>,

    pub output: OutputFormat,

    /// Filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            catalog_dir: None,
            exemption_boundary: None,
            output: OutputFormat::Text,
            log_level: "warn".to_string(),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Catalog directory does not exist: {0}")]
    MissingCatalogDir(PathBuf),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

impl CliConfig {
    /// Loads configuration from `path` (if present) and the environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let cfg: CliConfig = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.catalog_dir {
            if !dir.is_dir() {
                return Err(ConfigError::MissingCatalogDir(dir.clone()));
            }
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::InvalidValue("log_level".to_string()));
        }
        Ok(())
    }
}
