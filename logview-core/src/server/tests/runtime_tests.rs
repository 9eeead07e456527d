use crate::conf::{ConfigError, LogviewConfig};
use crate::server::{
    ConfigOverrides, RequestId, build_runtime_state, load_or_default, reload_runtime_state,
};
use arc_swap::ArcSwap;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn overrides_replace_config_values() {
    let overrides = ConfigOverrides {
        root_path: Some(PathBuf::from("/tmp/logs")),
        listen: Some("127.0.0.1:9999".into()),
    };

    let config = overrides.apply(LogviewConfig::default());

    assert_eq!(config.server.root_path, PathBuf::from("/tmp/logs"));
    assert_eq!(config.server.listen, "127.0.0.1:9999");
}

#[test]
fn explicit_config_path_is_loaded_and_overridden() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logview.hcl");
    fs::write(&path, "server {\n  listen = \"127.0.0.1:7000\"\n}\n").unwrap();
    let overrides = ConfigOverrides {
        root_path: Some(dir.path().to_path_buf()),
        listen: None,
    };

    // Act
    let config = load_or_default(Some(&path), &overrides).unwrap();

    // Assert
    assert_eq!(config.server.listen, "127.0.0.1:7000");
    assert_eq!(config.server.root_path, dir.path());
}

#[test]
fn invalid_override_fails_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logview.hcl");
    fs::write(&path, "").unwrap();
    let overrides = ConfigOverrides {
        root_path: None,
        listen: Some("not an address".into()),
    };

    let result = load_or_default(Some(&path), &overrides);

    assert!(matches!(result, Err(ConfigError::InvalidListen { .. })));
}

#[test]
fn override_repairs_an_invalid_file_value() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logview.hcl");
    fs::write(&path, "server {\n  listen = \"bad\"\n}\n").unwrap();
    let overrides = ConfigOverrides {
        root_path: None,
        listen: Some("127.0.0.1:9000".into()),
    };

    // Act
    let config = load_or_default(Some(&path), &overrides).unwrap();

    // Assert
    assert_eq!(config.server.listen, "127.0.0.1:9000");
}

#[test]
fn runtime_state_requires_a_root_directory() {
    let dir = tempdir().unwrap();
    let mut config = LogviewConfig::default();
    config.server.root_path = dir.path().join("missing");

    assert!(build_runtime_state(&config).is_err());

    config.server.root_path = dir.path().to_path_buf();
    let state = build_runtime_state(&config).unwrap();
    assert_eq!(state.root_path, dir.path().canonicalize().unwrap());
    assert!(state.conditions.is_empty());
    assert!(state.object_store.is_none());
}

#[test]
fn runtime_state_loads_file_conditions() {
    let dir = tempdir().unwrap();
    let conditions = dir.path().join("conditions.yaml");
    fs::write(
        &conditions,
        "conditions:\n  - filename_pattern: 'logs/'\n    filter: nofilter\n",
    )
    .unwrap();
    let mut config = LogviewConfig::default();
    config.server.root_path = dir.path().to_path_buf();
    config.general.file_conditions = Some(conditions);

    let state = build_runtime_state(&config).unwrap();

    assert_eq!(state.conditions.filter_for("logs/a.txt"), Some("nofilter"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn reload_swaps_in_the_new_root() {
    // Arrange
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let path = config_dir.path().join("logview.hcl");
    fs::write(
        &path,
        format!(
            "server {{\n  root_path = \"{}\"\n}}\n",
            second.path().display()
        ),
    )
    .unwrap();

    let mut initial = LogviewConfig::default();
    initial.server.root_path = first.path().to_path_buf();
    let state = ArcSwap::from_pointee(build_runtime_state(&initial).unwrap());

    // Act
    reload_runtime_state(Some(&path), &ConfigOverrides::default(), &state)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        state.load().root_path,
        second.path().canonicalize().unwrap()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_reload_keeps_the_old_state() {
    let root = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let path = config_dir.path().join("logview.hcl");
    fs::write(&path, "general {\n  view = \"pdfview\"\n}\n").unwrap();

    let mut initial = LogviewConfig::default();
    initial.server.root_path = root.path().to_path_buf();
    let state = ArcSwap::from_pointee(build_runtime_state(&initial).unwrap());

    let result = reload_runtime_state(Some(&path), &ConfigOverrides::default(), &state).await;

    assert!(result.is_err());
    assert_eq!(state.load().root_path, root.path().canonicalize().unwrap());
}

#[test]
fn request_ids_are_unique() {
    let a = RequestId::default();
    let b = RequestId::default();

    assert_ne!(a, b);
    assert_eq!(a.to_string().len(), 36);
}
