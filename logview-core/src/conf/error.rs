use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    //-------------------------------------------------------------------------
    // Validation
    //-------------------------------------------------------------------------
    #[error("invalid listen address '{listen}': {reason}")]
    InvalidListen { listen: String, reason: String },

    #[error("root path does not exist or is not a directory: {path}")]
    InvalidRootPath { path: PathBuf },

    #[error("unknown filter '{name}' (expected sevfilter or nofilter)")]
    UnknownFilter { name: String },

    #[error("unknown view '{name}' (expected htmlview, textview or passthroughview)")]
    UnknownView { name: String },

    #[error("invalid object store url '{url}'")]
    InvalidObjectStoreUrl { url: String },

    #[error("invalid pid file path '{pid_file}': {reason}")]
    InvalidPidFile { pid_file: PathBuf, reason: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
