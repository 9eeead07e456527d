use crate::conf::{
    ConfigError, DEFAULT_CONFIG_PATH, FileConditions, GeneralConfig, LogviewConfig, read_config,
    validate_config,
};
use crate::source::ObjectStore;
use anyhow::Result;
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a request needs, swapped as a whole on reload.
pub struct RuntimeState {
    pub root_path: PathBuf,
    pub general: GeneralConfig,
    pub conditions: FileConditions,
    pub object_store: Option<ObjectStore>,
}

/// Command line values that take precedence over the config file, and keep
/// doing so across reloads.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_path: Option<PathBuf>,
    pub listen: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: LogviewConfig) -> LogviewConfig {
        if let Some(root) = &self.root_path {
            config.server.root_path = root.clone();
        }
        if let Some(listen) = &self.listen {
            config.server.listen = listen.clone();
        }
        config
    }
}

/// Load `path`, or the default config file when no path was given. A
/// missing default file means built-in defaults. Validation runs once the
/// overrides are in place.
pub fn load_or_default(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<LogviewConfig, ConfigError> {
    let config = match path {
        Some(path) => read_config(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
            read_config(Path::new(DEFAULT_CONFIG_PATH))?
        }
        None => LogviewConfig::default(),
    };

    let config = overrides.apply(config);
    validate_config(&config)?;
    Ok(config)
}

pub fn build_runtime_state(cfg: &LogviewConfig) -> Result<RuntimeState> {
    let root_path = cfg
        .server
        .root_path
        .canonicalize()
        .ok()
        .filter(|p| p.is_dir())
        .ok_or_else(|| ConfigError::InvalidRootPath {
            path: cfg.server.root_path.clone(),
        })?;

    let conditions = FileConditions::load(cfg.general.file_conditions.as_deref());

    let object_store = cfg
        .object_store
        .as_ref()
        .map(ObjectStore::new)
        .transpose()?;

    Ok(RuntimeState {
        root_path,
        general: cfg.general.clone(),
        conditions,
        object_store,
    })
}

/// Re-read the config and swap in a fresh state.
///
/// The state owns a blocking HTTP client, which must not be built or
/// dropped on an async worker, so the rebuild runs on the blocking pool.
pub async fn reload_runtime_state(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    state: &ArcSwap<RuntimeState>,
) -> Result<()> {
    let config_path = config_path.map(Path::to_path_buf);
    let overrides = overrides.clone();

    let new_state = tokio::task::spawn_blocking(move || -> Result<RuntimeState> {
        let cfg = load_or_default(config_path.as_deref(), &overrides)?;
        build_runtime_state(&cfg)
    })
    .await??;

    {
        let old = state.load();
        tracing::info!(
            old_root = %old.root_path.display(),
            new_root = %new_state.root_path.display(),
            conditions = new_state.conditions.len(),
            object_store = new_state.object_store.is_some(),
            "runtime state reloaded"
        );
    }

    let previous = state.swap(Arc::new(new_state));
    // The old state may hold the last reference to a blocking client.
    tokio::task::spawn_blocking(move || drop(previous));

    Ok(())
}
