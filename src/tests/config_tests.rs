//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{ConfigLoader, KiaiConfig, Validate};
use crate::data_structures::kiai_filter::HashScheme;
use crate::error::config::ConfigError;
use crate::tests::TestFixture;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = KiaiConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.filter.expected_items, 1_000);
    assert_eq!(config.filter.false_positive_rate, 0.01);
    assert_eq!(config.filter.hash_scheme, HashScheme::Djb2);
    assert!(config.loader.trim);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = KiaiConfig::default();

    config.filter.expected_items = 0;
    assert!(config.validate().is_err());

    // Fix and test another invalid value
    config.filter.expected_items = 500;
    config.filter.false_positive_rate = 1.5;
    assert!(config.validate().is_err());

    // Fix and test another invalid value
    config.filter.false_positive_rate = 0.05;
    config.log.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "kiai.toml",
            r##"
    [filter]
    expected_items = 5000
    false_positive_rate = 0.001
    hash_scheme = "fnv"

    [loader]
    comment_prefix = "#"
    "##,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "KIAI_TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(config.filter.expected_items, 5_000);
    assert_eq!(config.filter.false_positive_rate, 0.001);
    assert_eq!(config.filter.hash_scheme, HashScheme::Fnv);
    assert_eq!(config.loader.comment_prefix.as_deref(), Some("#"));

    // Other values should be defaults
    assert!(config.loader.trim);
    assert_eq!(config.log.level, "info");
}

/// Test loading a JSON configuration file.
#[test]
fn test_load_json_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("kiai.json", r#"{ "filter": { "expected_items": 42 } }"#)
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "KIAI_TEST_JSON")
        .load()
        .unwrap();

    assert_eq!(config.filter.expected_items, 42);
    assert_eq!(config.filter.false_positive_rate, 0.01);
}

/// Test that environment variables override file values.
#[test]
fn test_env_overrides() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("kiai.toml", "[filter]\nexpected_items = 5000\n")
        .unwrap();

    fixture.set_env("KIAI_TEST_ENV__FILTER__EXPECTED_ITEMS", "250");
    fixture.set_env("KIAI_TEST_ENV__LOG__LEVEL", "warn");

    let config = ConfigLoader::new(Some(&config_path), "KIAI_TEST_ENV")
        .load()
        .unwrap();

    assert_eq!(config.filter.expected_items, 250);
    assert_eq!(config.log.level, "warn");
}

/// Test that missing and invalid files are reported.
#[test]
fn test_load_errors() {
    let fixture = TestFixture::new().unwrap();

    let missing = fixture.temp_dir.path().join("missing.toml");
    let result = ConfigLoader::new(Some(&missing), "KIAI_TEST_MISSING").load();
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));

    let unsupported = fixture.create_file("kiai.ini", "expected_items=1").unwrap();
    let result = ConfigLoader::new(Some(&unsupported), "KIAI_TEST_INI").load();
    assert!(matches!(result, Err(ConfigError::ParseError(_))));

    let invalid = fixture
        .create_file("bad.toml", "[filter]\nfalse_positive_rate = 2.0\n")
        .unwrap();
    let result = ConfigLoader::new(Some(&invalid), "KIAI_TEST_INVALID").load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

/// Generated configuration loads back to the defaults.
#[test]
fn test_generated_config_round_trips() {
    let fixture = TestFixture::new().unwrap();
    let toml = KiaiConfig::default().to_toml().unwrap();
    assert!(toml.contains("[filter]"));
    assert!(toml.contains("hash_scheme = \"djb2\""));

    let path = fixture.create_file("generated.toml", toml).unwrap();
    let config = ConfigLoader::new(Some(&path), "KIAI_TEST_GENERATED")
        .load()
        .unwrap();

    assert_eq!(config, KiaiConfig::default());
}

/// No file at all yields defaults.
#[test]
fn test_load_without_file() {
    let config = ConfigLoader::new(None::<&str>, "KIAI_TEST_NONE").load().unwrap();
    assert_eq!(config, KiaiConfig::default());
}
