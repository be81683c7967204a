use super::*;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = BufferConfig::default();
    assert_eq!(config.undo_limit, 1000);
    assert!(config.incremental_parse);
    assert!(config.highlight_on_change);
    assert!(config.is_punctuation('.'));
    assert!(config.is_punctuation('('));
    assert!(!config.is_punctuation('_'));
    assert!(!config.is_punctuation('a'));
}

#[test]
fn test_partial_json_fills_defaults() {
    let config = BufferConfig::from_json_str(r#"{ "undo_limit": 5, "punctuation": ".," }"#).unwrap();
    assert_eq!(config.undo_limit, 5);
    assert_eq!(config.punctuation, ".,");
    assert!(config.incremental_parse);
    assert!(!config.is_punctuation('('));
}

#[test]
fn test_malformed_json_is_config_error() {
    let err = BufferConfig::from_json_str("{ undo_limit: ").unwrap_err();
    assert!(matches!(err, crate::error::Error::Config(_)));
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = BufferConfig::load(&dir.path().join("setting.json")).unwrap();
    assert_eq!(config, BufferConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".ztext").join("setting.json");

    let config = BufferConfig {
        undo_limit: 42,
        highlight_on_change: false,
        ..BufferConfig::default()
    };
    config.save(&path).unwrap();
    assert!(path.exists());

    assert_eq!(BufferConfig::load(&path).unwrap(), config);
}

#[test]
fn test_settings_path_file_name() {
    if let Some(path) = BufferConfig::settings_path() {
        assert!(path.ends_with(".ztext/setting.json"));
    }
}
