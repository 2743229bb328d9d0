//! Integration tests for the logging configuration.

use lingua_common::{LogFormat, LoggingConfig};
use std::path::PathBuf;

#[test]
fn test_logging_config_from_yaml() {
    let yaml = "level: debug\nformat: json\nfile_path: /tmp/lingua.log\n";
    let config: LoggingConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.file_path, Some(PathBuf::from("/tmp/lingua.log")));
    assert!(config.include_targets);
}

#[test]
fn test_logging_config_json_round_trip_keeps_lowercase_format() {
    let config = LoggingConfig {
        format: LogFormat::Compact,
        include_targets: false,
        ..LoggingConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""format":"compact""#));

    let back: LoggingConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_unknown_format_is_rejected() {
    let result: Result<LoggingConfig, _> = serde_yaml::from_str("format: xml\n");
    assert!(result.is_err());
}

#[test]
fn test_file_logging_writes_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lingua.log");
    let config = LoggingConfig {
        level: "info".to_string(),
        format: LogFormat::Json,
        file_path: Some(path.clone()),
        include_targets: true,
    };

    lingua_common::init_logging(&config).unwrap();
    tracing::info!(locale = "zh-Hans", "catalog ready");

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("catalog ready"));
    assert!(written.contains("zh-Hans"));
}
