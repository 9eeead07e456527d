use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogviewConfig {
    pub server: ServerConfig,
    pub general: GeneralConfig,

    /// Remote fallback for logs that are not on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_store: Option<ObjectStoreConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub listen: String,

    /// Directory log names are resolved under.
    pub root_path: PathBuf,

    /// Optional number of worker threads - default is decided by Pingora.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Optional pid file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8000".to_string(),
            root_path: PathBuf::from("/srv/static/logs"),
            threads: None,
            pid_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Filter used when no file condition picks one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// View used when no file condition picks one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,

    pub generate_folder_index: bool,

    /// Remove ANSI color codes before classifying lines.
    pub strip_control: bool,

    /// YAML file with per-filename filter/view rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_conditions: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectStoreConfig {
    pub base_url: String,
    pub container: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}
