//! Integration tests for tscat-config crate.

use std::path::PathBuf;
use tscat_common::test_utils::{create_temp_dir, write_fixture};
use tscat_common::{LoggingOptions, TscatError};
use tscat_config::{Config, ConfigError, ConfigLoader, ConfigValidator};

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(ConfigValidator::validate(&config).is_ok());

    config.catalog.locale = Some("ug".to_string());
    config.catalog.path = Some(PathBuf::from("translations/dde-control-center_ug.ts"));
    assert!(ConfigValidator::validate(&config).is_ok());

    config.logging.level = String::new();
    assert!(ConfigValidator::validate(&config).is_err());
}

#[test]
fn test_load_full_yaml_file() {
    let dir = create_temp_dir();
    let path = write_fixture(
        dir.path(),
        "tscat.yaml",
        "catalog:\n  path: app_ug.ts\n  locale: ug\nlogging:\n  level: tscat_catalog=debug\n  json: true\noutput:\n  truncate: 40\n",
    );

    let config = ConfigLoader::read_config(&path, &|_: &str| -> Option<String> { None }).unwrap();
    ConfigValidator::validate(&config).unwrap();
    assert_eq!(config.catalog.path, Some(PathBuf::from("app_ug.ts")));
    assert_eq!(config.catalog.locale.as_deref(), Some("ug"));
    assert_eq!(config.output.truncate, 40);

    let options = LoggingOptions::from(&config.logging);
    assert_eq!(options.level, "tscat_catalog=debug");
    assert!(options.json_format);
    assert_eq!(options.file_path, None);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = create_temp_dir();
    let err = ConfigLoader::load_config(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_toml() {
    let dir = create_temp_dir();
    let path = write_fixture(dir.path(), "tscat.toml", "[catalog\npath = 1\n");
    assert!(matches!(
        ConfigLoader::load_config(&path),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_config_error_converts_to_common_error() {
    let err: TscatError = ConfigError::Validation("bad".to_string()).into();
    assert!(matches!(err, TscatError::Config { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_serialize_roundtrip_through_yaml() {
    let mut config = Config::default();
    config.catalog.path = Some(PathBuf::from("a.json"));
    config.logging.file = Some(PathBuf::from("tscat.log"));
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, config);
}
