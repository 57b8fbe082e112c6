//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tscat_common::LoggingOptions;

/// Main configuration structure for tscat.
///
/// Every section is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog selection.
    pub catalog: CatalogConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Output formatting.
    pub output: OutputConfig,
}

/// Which catalog to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a `.ts` or compiled `.json` catalog.
    pub path: Option<PathBuf>,
    /// Locale overriding the catalog's own `language` attribute.
    pub locale: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives, `RUST_LOG` syntax.
    pub level: String,
    /// Emit JSON lines.
    pub json: bool,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

/// Output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Maximum displayed length of source texts, in characters. Zero
    /// disables truncation.
    pub truncate: usize,
}

impl From<&LoggingConfig> for LoggingOptions {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            json_format: config.json,
            file_path: config
                .file
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            ..Self::default()
        }
    }
}
