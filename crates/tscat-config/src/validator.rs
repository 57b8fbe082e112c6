//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use std::path::Path;
use tscat_common::parse_filter;
use unic_langid::LanguageIdentifier;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first problem found.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if let Some(path) = &config.catalog.path {
            validate_catalog_path(path)?;
        }
        if let Some(locale) = &config.catalog.locale {
            validate_locale(locale)?;
        }
        validate_filter(&config.logging.level)?;
        if let Some(file) = &config.logging.file {
            validate_log_file(file)?;
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

/// The catalog must be a `.ts` or compiled `.json` file.
pub fn validate_catalog_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(invalid("catalog.path cannot be empty"));
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("ts" | "json") => Ok(()),
        _ => Err(invalid(format!(
            "catalog.path must end in .ts or .json: {}",
            path.display()
        ))),
    }
}

/// The locale must parse as a language identifier; `_` and `-` both
/// separate subtags.
pub fn validate_locale(locale: &str) -> Result<(), ConfigError> {
    let trimmed = locale.trim();
    if trimmed.is_empty() {
        return Err(invalid("catalog.locale cannot be empty"));
    }
    trimmed
        .parse::<LanguageIdentifier>()
        .map(|_| ())
        .map_err(|e| invalid(format!("catalog.locale is not a locale tag: '{locale}' ({e})")))
}

/// The level must be a valid `RUST_LOG` style filter.
pub fn validate_filter(filter: &str) -> Result<(), ConfigError> {
    parse_filter(filter)
        .map(|_| ())
        .map_err(|e| invalid(format!("logging.level: {e}")))
}

/// The log file's directory must exist.
pub fn validate_log_file(path: &Path) -> Result<(), ConfigError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(invalid(format!(
            "logging.file directory does not exist: {}",
            dir.display()
        ))),
        _ if path.is_dir() => Err(invalid(format!(
            "logging.file is a directory: {}",
            path.display()
        ))),
        _ => Ok(()),
    }
}
