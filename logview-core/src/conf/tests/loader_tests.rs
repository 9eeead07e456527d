use crate::conf::{ConfigError, LogviewConfig, load_config, parse_config, validate_config};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const FULL_CONFIG: &str = r#"
server {
  listen    = "127.0.0.1:9000"
  root_path = "/var/log/ci"
  threads   = 4
}

general {
  filter                = "sevfilter"
  view                  = "textview"
  generate_folder_index = true
  strip_control         = true
  file_conditions       = "conditions.yaml"
}

object_store {
  base_url  = "http://swift.example:8080/v1/AUTH_ci"
  container = "logs"
}
"#;

#[test]
fn parses_every_section() {
    // Act
    let config = parse_config(FULL_CONFIG, Path::new("logview.hcl")).unwrap();

    // Assert
    assert_eq!(config.server.listen, "127.0.0.1:9000");
    assert_eq!(config.server.root_path, PathBuf::from("/var/log/ci"));
    assert_eq!(config.server.threads, Some(4));
    assert_eq!(config.general.filter.as_deref(), Some("sevfilter"));
    assert_eq!(config.general.view.as_deref(), Some("textview"));
    assert!(config.general.generate_folder_index);
    assert!(config.general.strip_control);

    let store = config.object_store.unwrap();
    assert_eq!(store.container, "logs");
    assert_eq!(store.timeout_secs, 10);
}

#[test]
fn empty_file_is_all_defaults() {
    let config = parse_config("", Path::new("logview.hcl")).unwrap();

    assert_eq!(config, LogviewConfig::default());
    assert_eq!(config.server.listen, "0.0.0.0:8000");
    assert!(config.object_store.is_none());
}

#[test]
fn unknown_fields_are_rejected() {
    let result = parse_config("server {\n  lisen = \"x\"\n}\n", Path::new("bad.hcl"));

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn relative_file_conditions_follow_the_config_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logview.hcl");
    fs::write(&path, FULL_CONFIG).unwrap();

    // Act
    let config = load_config(&path).unwrap();

    // Assert
    assert_eq!(
        config.general.file_conditions,
        Some(dir.path().join("conditions.yaml"))
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();

    let result = load_config(&dir.path().join("nope.hcl"));

    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn validation_rejects_bad_values() {
    let mut config = LogviewConfig::default();
    config.server.listen = "localhost".into();
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::InvalidListen { .. })
    ));

    let mut config = LogviewConfig::default();
    config.general.filter = Some("grepfilter".into());
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::UnknownFilter { .. })
    ));

    let mut config = LogviewConfig::default();
    config.general.view = Some("pdfview".into());
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::UnknownView { .. })
    ));

    let mut config = parse_config(FULL_CONFIG, Path::new("logview.hcl")).unwrap();
    if let Some(store) = config.object_store.as_mut() {
        store.base_url = "mailto:ops@example.com".into();
    }
    assert!(matches!(
        validate_config(&config),
        Err(ConfigError::InvalidObjectStoreUrl { .. })
    ));
}

#[test]
fn directory_is_not_a_pid_file() {
    let dir = tempdir().unwrap();
    let mut config = LogviewConfig::default();
    config.server.pid_file = Some(dir.path().to_path_buf());

    let result = validate_config(&config);

    assert!(matches!(result, Err(ConfigError::InvalidPidFile { .. })));
}
