use crate::conf::error::ConfigError;
use crate::conf::types::LogviewConfig;
use crate::pipeline::FilterKind;
use crate::render::ViewKind;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/logview.hcl";

/// Read and validate a config file.
pub fn load_config(path: &Path) -> Result<LogviewConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Read and parse a config file without validating it, for callers that
/// still layer overrides on top.
///
/// A relative `general.file_conditions` path is taken relative to the
/// directory holding the config file.
pub fn read_config(path: &Path) -> Result<LogviewConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let mut config = parse_config(&s, path)?;

    if let (Some(conditions), Some(dir)) = (&config.general.file_conditions, path.parent()) {
        if conditions.is_relative() {
            config.general.file_conditions = Some(dir.join(conditions));
        }
    }

    Ok(config)
}

pub fn parse_config(s: &str, path: &Path) -> Result<LogviewConfig, ConfigError> {
    hcl::from_str(s).map_err(|e| ConfigError::parse(path, e))
}

/// Checks that do not touch the filesystem. The root directory is checked
/// when the server starts, since the CLI may still override it.
pub fn validate_config(config: &LogviewConfig) -> Result<(), ConfigError> {
    config
        .server
        .listen
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidListen {
            listen: config.server.listen.clone(),
            reason: e.to_string(),
        })?;

    if let Some(name) = &config.general.filter {
        if FilterKind::from_name(name).is_none() {
            return Err(ConfigError::UnknownFilter { name: name.clone() });
        }
    }

    if let Some(name) = &config.general.view {
        if !ViewKind::is_known_name(name) {
            return Err(ConfigError::UnknownView { name: name.clone() });
        }
    }

    if let Some(pid_file) = &config.server.pid_file {
        if pid_file.as_os_str().is_empty() || pid_file.is_dir() {
            return Err(ConfigError::InvalidPidFile {
                pid_file: pid_file.clone(),
                reason: "must be a file path".to_string(),
            });
        }
    }

    if let Some(store) = &config.object_store {
        let valid = url::Url::parse(&store.base_url).is_ok_and(|u| !u.cannot_be_a_base());
        if !valid {
            return Err(ConfigError::InvalidObjectStoreUrl {
                url: store.base_url.clone(),
            });
        }
    }

    Ok(())
}
