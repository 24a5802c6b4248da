//! Tests for TOML configuration loading

use std::io::Write;

use revq_common::config::{load_toml_config_from, TomlConfig};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
    file.write_all(content.as_bytes())
        .expect("Should write temp file");
    file
}

#[test]
fn test_absent_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("config.toml");

    let config = load_toml_config_from(&path).expect("Absent file should not error");
    assert!(config.port.is_none());
    assert!(config.notion_api_key.is_none());
    assert!(config.title_variations.is_none());
}

#[test]
fn test_full_config_parses() {
    let file = write_config(
        r#"
port = 4000
notion_api_key = "secret_abc"
notion_database_id = "db123"
google_api_key = "g-key"
google_cx = "cx-id"
title_variations = false
"#,
    );

    let config = load_toml_config_from(file.path()).expect("Should parse");
    assert_eq!(config.port, Some(4000));
    assert_eq!(config.notion_api_key.as_deref(), Some("secret_abc"));
    assert_eq!(config.notion_database_id.as_deref(), Some("db123"));
    assert_eq!(config.google_api_key.as_deref(), Some("g-key"));
    assert_eq!(config.google_cx.as_deref(), Some("cx-id"));
    assert_eq!(config.title_variations, Some(false));
}

#[test]
fn test_partial_config_leaves_rest_unset() {
    let file = write_config("notion_database_id = \"db123\"\n");

    let config = load_toml_config_from(file.path()).expect("Should parse");
    assert_eq!(config.notion_database_id.as_deref(), Some("db123"));
    assert!(config.port.is_none());
    assert!(config.notion_api_key.is_none());
}

#[test]
fn test_malformed_config_errors() {
    let file = write_config("port = \"not a number\"\n");

    let result = load_toml_config_from(file.path());
    assert!(result.is_err());
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = TomlConfig {
        port: Some(3099),
        notion_api_key: Some("secret".to_string()),
        notion_database_id: None,
        google_api_key: None,
        google_cx: None,
        title_variations: Some(true),
    };

    let serialized = toml::to_string(&config).expect("Should serialize");
    let file = write_config(&serialized);

    let reloaded = load_toml_config_from(file.path()).expect("Should parse");
    assert_eq!(reloaded.port, Some(3099));
    assert_eq!(reloaded.notion_api_key.as_deref(), Some("secret"));
    assert_eq!(reloaded.title_variations, Some(true));
}
