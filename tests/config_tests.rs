use std::fs;
use std::time::Duration;
use stephub_provider::config::{ConfigManager, ConfigurationError};
use tempfile::TempDir;

fn config_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

#[test]
fn test_environment_file_overrides_base_file() {
    let dir = config_dir(&[
        (
            "provider.toml",
            r#"
[logging]
level = "debug"

[dispatch]
slow_invocation_ms = 100
"#,
        ),
        (
            "provider.staging.toml",
            r#"
[dispatch]
slow_invocation_ms = 2000
"#,
        ),
    ]);

    let manager =
        ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "staging")
            .unwrap();

    assert_eq!(manager.environment(), "staging");
    assert_eq!(manager.config_directory(), dir.path());
    assert_eq!(manager.config().environment, "staging");
    assert_eq!(manager.config().logging.level, "debug");
    assert_eq!(
        manager.config().dispatch.slow_invocation_threshold(),
        Some(Duration::from_secs(2))
    );
}

#[test]
fn test_other_environment_files_are_ignored() {
    let dir = config_dir(&[(
        "provider.production.toml",
        r#"
[logging]
json = true
"#,
    )]);

    let manager =
        ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
            .unwrap();
    assert!(!manager.config().logging.json);
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = config_dir(&[(
        "provider.toml",
        r#"
[dispatch]
slow_invocation_ms = 0
"#,
    )]);

    let err = ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidValue { .. }));
}

#[test]
fn test_malformed_file_is_a_load_error() {
    let dir = config_dir(&[("provider.toml", "[logging\nlevel = ")]);

    let err = ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
        .unwrap_err();
    match err {
        ConfigurationError::LoadFailed { environment, .. } => assert_eq!(environment, "test"),
        other => panic!("unexpected error {other:?}"),
    }
}
