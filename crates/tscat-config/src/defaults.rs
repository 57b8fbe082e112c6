//! Default values for every configuration section.

use crate::schema::{CatalogConfig, Config, LoggingConfig, OutputConfig};

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Default truncation width for displayed source texts.
pub const DEFAULT_TRUNCATE: usize = 60;

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            locale: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
            file: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            truncate: DEFAULT_TRUNCATE,
        }
    }
}
