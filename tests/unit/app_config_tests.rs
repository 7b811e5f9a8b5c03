/*!
 * Tests for application configuration
 */

use moddict::analysis::OutputFormat;
use moddict::app_config::{Config, LogLevel};
use moddict::errors::AppError;

use crate::common::create_temp_repository;

#[test]
fn test_config_default_shouldUseSummaryAndInfo() {
    let config = Config::default();

    assert_eq!(config.format, OutputFormat::Summary);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.min_count, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_load_shouldReadAllFields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moddict.json");
    std::fs::write(
        &path,
        r#"{"database_path": "/data/mods.db", "min_count": 5, "format": "json", "log_level": "warn"}"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.database_path.as_deref(), Some("/data/mods.db"));
    assert_eq!(config.min_count, 5);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.log_level, LogLevel::Warn);
}

#[test]
fn test_config_serialize_shouldUseLowercaseEnums() {
    let json = serde_json::to_string(&Config::default()).unwrap();
    assert!(json.contains(r#""format":"summary""#));
    assert!(json.contains(r#""log_level":"info""#));
}

#[test]
fn test_config_validate_withBlankDatabasePath_shouldFail() {
    let config = Config {
        database_path: Some("  ".to_string()),
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(AppError::Config(_))));
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_createTempRepository_shouldOpenDatabaseFile() {
    let (dir, repo) = create_temp_repository().unwrap();
    assert!(dir.path().join("moddict.db").exists());
    assert_eq!(repo.connection().stats().unwrap().mod_count, 0);
}
