//! Tests for configuration resolution
//!
//! Priority order: overrides (CLI/env) > TOML file > compiled defaults.
//!
//! Tests that point XDG_CONFIG_HOME somewhere else are marked #[serial]
//! so they never race each other on the process environment.

use cricket_common::config::{
    load_toml_config, ConfigOverrides, ServiceConfig, TomlConfig, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_MAX_FILE_BYTES, DEFAULT_PORT,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
fn test_full_toml_config_parses() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_config(
        temp_dir.path(),
        r#"
        database_path = "/data/cricket.db"
        host = "0.0.0.0"
        port = 8080

        [logging]
        level = "debug"

        [limits]
        max_body_bytes = 1024
        max_file_bytes = 512
        "#,
    );

    let toml_config = load_toml_config(&path).unwrap();
    let config = ServiceConfig::merge(ConfigOverrides::default(), toml_config);

    assert_eq!(config.database_path, PathBuf::from("/data/cricket.db"));
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.max_body_bytes, 1024);
    assert_eq!(config.max_file_bytes, 512);
}

#[test]
fn test_partial_toml_config_keeps_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_config(temp_dir.path(), "port = 9000\n");

    let toml_config = load_toml_config(&path).unwrap();
    assert_eq!(toml_config.logging.level, "info");

    let config = ServiceConfig::merge(ConfigOverrides::default(), toml_config);
    assert_eq!(config.port, 9000);
    assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    assert_eq!(config.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
}

#[test]
fn test_malformed_toml_is_config_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_config(temp_dir.path(), "port = \"not a number\"\n");

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(cricket_common::Error::Config(_))));
}

#[test]
fn test_explicit_missing_config_file_is_error() {
    let overrides = ConfigOverrides {
        config_file: Some(PathBuf::from("/nonexistent/cricket/config.toml")),
        ..Default::default()
    };

    let result = ServiceConfig::resolve(overrides);
    assert!(matches!(result, Err(cricket_common::Error::Config(_))));
}

#[test]
fn test_explicit_config_file_with_overrides() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = write_config(temp_dir.path(), "port = 7000\nhost = \"10.0.0.1\"\n");

    let overrides = ConfigOverrides {
        config_file: Some(path.clone()),
        port: Some(7001),
        log_level: Some("warn".to_string()),
        ..Default::default()
    };

    let config = ServiceConfig::resolve(overrides).unwrap();
    assert_eq!(config.port, 7001);
    assert_eq!(config.host, "10.0.0.1");
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.config_file, Some(path));
}

#[test]
#[serial]
fn test_user_config_dir_is_probed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let cricket_dir = temp_dir.path().join("cricket");
    std::fs::create_dir_all(&cricket_dir).unwrap();
    write_config(&cricket_dir, "port = 6123\n");

    let previous = env::var_os("XDG_CONFIG_HOME");
    env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    let config = ServiceConfig::resolve(ConfigOverrides::default());

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    #[cfg(target_os = "linux")]
    {
        let config = config.unwrap();
        assert_eq!(config.port, 6123);
        assert_eq!(config.config_file, Some(cricket_dir.join("config.toml")));
    }
    #[cfg(not(target_os = "linux"))]
    assert!(config.is_ok());
}

#[test]
#[serial]
fn test_no_config_file_uses_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();

    let previous = env::var_os("XDG_CONFIG_HOME");
    env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    let config = ServiceConfig::resolve(ConfigOverrides::default());

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    // /etc/cricket/config.toml could exist on a dev box; only check when it doesn't
    if !PathBuf::from("/etc/cricket/config.toml").exists() {
        let config = config.unwrap();
        assert_eq!(config.config_file, None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config, ServiceConfig::merge(ConfigOverrides::default(), TomlConfig::default()));
    }
}
