//! Configuration loading: file formats, environment overrides and discovery.

use crate::schema::Config;
use crate::validator::ConfigValidator;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use tscat_common::TscatError;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "TSCAT_CONFIG_PATH";

/// File names searched for in the working directory, in order.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["tscat.yaml", "tscat.yml", "tscat.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension names no supported format
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

impl From<ConfigError> for TscatError {
    fn from(err: ConfigError) -> Self {
        TscatError::config_with_source("failed to load configuration", err)
    }
}

/// Configuration file format, from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse configuration text in this format
    pub fn parse(self, content: &str) -> Result<Config, ConfigError> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_with(Some(path.as_ref()), |_| {})
    }

    /// Load configuration from environment variables and files.
    ///
    /// Looks at `TSCAT_CONFIG_PATH` first, then the default file names in
    /// the working directory, and falls back to defaults.
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_with(None, |_| {})
    }

    /// Load from `path` (or by discovery), let `overrides` adjust the result,
    /// then validate. Command line options go through `overrides` so they
    /// win over file and environment settings.
    pub fn load_with(
        path: Option<&Path>,
        overrides: impl FnOnce(&mut Config),
    ) -> Result<Config, ConfigError> {
        let env = |var: &str| env::var(var).ok();
        let mut config = match path {
            Some(path) => Self::read_config(path, &env)?,
            None => Self::discover(Path::new("."), &env)?,
        };
        overrides(&mut config);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Discovery with an explicit search directory and environment. The
    /// result is not validated yet.
    pub fn discover(dir: &Path, env: &dyn Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        if let Some(path) = env(CONFIG_PATH_VAR) {
            return Self::read_config(Path::new(&path), env);
        }
        if let Some(path) = Self::find_default_file(dir) {
            return Self::read_config(&path, env);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config, env)?;
        Ok(config)
    }

    /// First default config file present in `dir`
    pub fn find_default_file(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Parse `path` and apply the environment, without validation
    pub fn read_config(
        path: &Path,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = format.parse(&content)?;
        Self::apply_env_overrides(&mut config, env)?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Apply environment variable overrides to configuration.
    ///
    /// `TSCAT_LOG_LEVEL` wins over `RUST_LOG`; both win over the file and
    /// lose to command line options.
    pub fn apply_env_overrides(
        config: &mut Config,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(path) = env("TSCAT_CATALOG") {
            config.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(locale) = env("TSCAT_LOCALE") {
            config.catalog.locale = Some(locale);
        }

        if let Some(level) = env("TSCAT_LOG_LEVEL").or_else(|| env("RUST_LOG")) {
            config.logging.level = level;
        }

        if let Some(json) = env("TSCAT_LOG_JSON") {
            config.logging.json = json.trim().parse().map_err(|e| ConfigError::EnvParse {
                var: "TSCAT_LOG_JSON".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tscat_common::test_utils::{create_temp_dir, write_fixture};

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")).unwrap(), ConfigFormat::Json);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("a.ini")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_partial_files_take_defaults() {
        let yaml = ConfigFormat::Yaml.parse("catalog:\n  path: app_ug.ts\n").unwrap();
        assert_eq!(yaml.catalog.path, Some(PathBuf::from("app_ug.ts")));
        assert_eq!(yaml.logging.level, "warn");

        let toml = ConfigFormat::Toml.parse("[logging]\njson = true\n").unwrap();
        assert!(toml.logging.json);
        assert_eq!(toml.catalog.path, None);

        let json = ConfigFormat::Json.parse(r#"{"output": {"truncate": 0}}"#).unwrap();
        assert_eq!(json.output.truncate, 0);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let env = env_of(&[
            ("TSCAT_CATALOG", "translations/app_de.ts"),
            ("TSCAT_LOCALE", "de_DE"),
            ("TSCAT_LOG_LEVEL", "debug"),
            ("TSCAT_LOG_JSON", "true"),
        ]);
        ConfigLoader::apply_env_overrides(&mut config, &env).unwrap();
        assert_eq!(config.catalog.path, Some(PathBuf::from("translations/app_de.ts")));
        assert_eq!(config.catalog.locale.as_deref(), Some("de_DE"));
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_rust_log_below_tscat_log_level() {
        let mut config = Config::default();
        ConfigLoader::apply_env_overrides(&mut config, &env_of(&[("RUST_LOG", "tscat=trace")])).unwrap();
        assert_eq!(config.logging.level, "tscat=trace");

        let env = env_of(&[("RUST_LOG", "tscat=trace"), ("TSCAT_LOG_LEVEL", "info")]);
        ConfigLoader::apply_env_overrides(&mut config, &env).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_env_overrides(&mut config, &env_of(&[("TSCAT_LOG_JSON", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParse { ref var, .. } if var == "TSCAT_LOG_JSON"));
    }

    #[test]
    fn test_discovery_order() {
        let dir = create_temp_dir();
        let none = env_of(&[]);

        let config = ConfigLoader::discover(dir.path(), &none).unwrap();
        assert_eq!(config, Config::default());

        write_fixture(dir.path(), "tscat.toml", "[catalog]\npath = \"from_toml.ts\"\n");
        let config = ConfigLoader::discover(dir.path(), &none).unwrap();
        assert_eq!(config.catalog.path, Some(PathBuf::from("from_toml.ts")));

        write_fixture(dir.path(), "tscat.yaml", "catalog:\n  path: from_yaml.ts\n");
        let config = ConfigLoader::discover(dir.path(), &none).unwrap();
        assert_eq!(config.catalog.path, Some(PathBuf::from("from_yaml.ts")));

        let explicit = write_fixture(dir.path(), "custom.json", r#"{"catalog": {"path": "from_json.json"}}"#);
        let env = env_of(&[(CONFIG_PATH_VAR, explicit.to_str().unwrap())]);
        let config = ConfigLoader::discover(dir.path(), &env).unwrap();
        assert_eq!(config.catalog.path, Some(PathBuf::from("from_json.json")));
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let dir = create_temp_dir();
        let path = write_fixture(dir.path(), "tscat.yaml", "catalog:\n  path: app.po\n");
        let config = ConfigLoader::read_config(&path, &env_of(&[])).unwrap();
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_overrides_run_before_validation() {
        let dir = create_temp_dir();
        let path = write_fixture(dir.path(), "tscat.yaml", "catalog:\n  locale: x\n");
        assert!(matches!(
            ConfigLoader::load_with(Some(&path), |_| {}),
            Err(ConfigError::Validation(_))
        ));

        let config = ConfigLoader::load_with(Some(&path), |config| {
            config.catalog.locale = Some("ug".into());
        })
        .unwrap();
        assert_eq!(config.catalog.locale.as_deref(), Some("ug"));
    }
}
