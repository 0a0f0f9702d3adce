//! Configuration system tests
//!
//! Tests for config paths and loading config files from disk.

use std::fs;

use clockface::config::ClockConfig;
use clockface::config_paths;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("clockface"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_themes_and_logs_are_subdirs_of_config() {
    let config = config_paths::config_dir().unwrap();
    assert!(config_paths::themes_dir().unwrap().starts_with(&config));
    assert!(config_paths::logs_dir().unwrap().starts_with(&config));
}

// ========================================================================
// Config File Tests
// ========================================================================

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "theme: midnight\nwindow:\n  title: Desk Clock\n  center: false\nhands:\n  second: { length: 0.95, width: 1.5 }\n",
    )
    .unwrap();

    let config = ClockConfig::load_from(&path).unwrap();
    assert_eq!(config.theme, "midnight");
    assert_eq!(config.window.title, "Desk Clock");
    assert!(!config.window.center);
    assert_eq!(config.window.width, 600);
    assert_eq!(config.hands.second.length, 0.95);
    assert_eq!(config.hands.second.width, 1.5);
}

#[test]
fn test_load_from_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClockConfig::load_from(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(err.contains("Failed to read config"), "got: {}", err);
}

#[test]
fn test_load_from_malformed_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "window: [oops").unwrap();

    let err = ClockConfig::load_from(&path).unwrap_err();
    assert!(err.contains("Failed to parse config"), "got: {}", err);
    assert!(err.contains("config.yaml"), "got: {}", err);
}

#[test]
fn test_config_serialize_deserialize() {
    let mut config = ClockConfig::default();
    config.theme = "midnight".to_string();
    config.window.width = 320;

    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed = ClockConfig::from_yaml(&yaml).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_theme_file_lives_in_themes_dir() {
    let path = config_paths::theme_file("midnight").unwrap();
    assert!(path.starts_with(config_paths::themes_dir().unwrap()));
    assert!(path.to_string_lossy().ends_with("midnight.yaml"));
}
