//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::ChatloadConfig;
use chatload_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_chatload_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[target]
base_url = "https://chat.example.com/v1"
app_id = "app-123"

[load]
users = 25
pause_min_secs = 0.5

[queries]
pool = ["ping", "pong"]
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.target.base_url, "https://chat.example.com/v1");
    assert_eq!(config.target.app_id, "app-123");
    assert_eq!(config.load.users, 25);
    assert_eq!(config.load.pause_min_secs, 0.5);
    assert_eq!(config.queries.pool, vec!["ping", "pong"]);
    // Defaults preserved
    assert_eq!(config.load.duration_secs, 60);
    assert_eq!(config.load.pause_max_secs, 3.0);
    assert!(config.target.api_token.is_empty());
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn invalid_values_load_but_fail_finalize() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[load]
users = 0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.load.users, 0);

    let err = crate::finalize(config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
    assert!(err.to_string().contains("load.users"));
}

#[test]
fn override_can_repair_file_values_before_finalize() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[target]
app_id = "app-1"
api_token = "tok"

[load]
duration_secs = 20
ramp_up_secs = 30
"#,
    )
    .unwrap();

    let mut config = load_from_path(&path).unwrap();
    assert!(crate::finalize(config.clone()).is_err());

    config.load.duration_secs = 120;
    let config = crate::finalize(config).unwrap();
    assert_eq!(config.load.duration_secs, 120);
    assert_eq!(config.load.ramp_up_secs, 30);
}

#[test]
fn env_override_applies_after_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[target]\napp_id = \"app-1\"\napi_token = \"tok\"\n\n[load]\nusers = 0\n",
    )
    .unwrap();

    let mut config = load_from_path(&path).unwrap();
    crate::env::apply_env_overrides(&mut config, |key| {
        (key == crate::env::ENV_USERS).then(|| "5".to_string())
    })
    .unwrap();
    let config = crate::finalize(config).unwrap();
    assert_eq!(config.load.users, 5);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chatload").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.load.users, 10);
    assert_eq!(config.target.base_url, "http://localhost/v1");
}

#[test]
fn create_default_config_does_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[load]\nusers = 3\n").unwrap();

    assert!(create_default_config(&path).is_err());
    let config = load_from_path(&path).unwrap();
    assert_eq!(config.load.users, 3);
}

#[test]
fn default_config_toml_is_valid() {
    let content = default_config_toml();
    let config: ChatloadConfig = toml::from_str(&content).unwrap();
    assert_eq!(config.load.users, 10);
    assert!(!config.queries.pool.is_empty());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("chatload"));
        assert!(path_str.ends_with("config.toml"));
    }
}
