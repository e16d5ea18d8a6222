use fieldlog::{ConfigError, LogFormat, LogLevel, Logger, LoggingConfig, SharedBuffer};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_logging_config_integration() {
    let yaml_config = r#"
level: debug
production: true
"#;

    let config = LoggingConfig::from_yaml_str(yaml_config).unwrap();
    assert_eq!(config.level, "debug");
    assert!(config.production);

    let logger = Logger::new(SharedBuffer::new());
    config.apply(&logger);

    assert_eq!(logger.level(), LogLevel::Debug);
    assert_eq!(logger.format(), LogFormat::Json);
}

#[test]
fn test_minimal_logging_config() {
    let config = LoggingConfig::default();

    let logger = Logger::new(SharedBuffer::new());
    config.apply(&logger);

    assert_eq!(logger.level(), LogLevel::Info);
    assert_eq!(logger.format(), LogFormat::Text);
}

#[test]
fn test_config_applies_only_once() {
    let logger = Logger::new(SharedBuffer::new());

    LoggingConfig::from_yaml_str("level: warn\nproduction: true\n")
        .unwrap()
        .apply(&logger);
    LoggingConfig::from_yaml_str("level: trace\n")
        .unwrap()
        .apply(&logger);

    assert_eq!(logger.level(), LogLevel::Warn);
    assert_eq!(logger.format(), LogFormat::Json);
}

#[test]
fn test_invalid_level_in_config_falls_back_to_info() {
    let logger = Logger::new(SharedBuffer::new());

    LoggingConfig::from_yaml_str("level: loud\nproduction: true\n")
        .unwrap()
        .apply(&logger);

    assert_eq!(logger.level(), LogLevel::Info);
}

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "level: error").unwrap();
    writeln!(file, "production: false").unwrap();

    let config = LoggingConfig::from_file(file.path()).unwrap();
    assert_eq!(config.level, "error");
    assert!(!config.production);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = LoggingConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();

    assert!(matches!(err, ConfigError::FileReadError { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}
