use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ConditionsError {
    #[error("failed to read file conditions {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file conditions yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid filename_pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ConditionsFile {
    #[serde(default)]
    conditions: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    filename_pattern: Option<String>,
    filter: Option<String>,
    view: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FileCondition {
    pattern: Regex,
    pub filter: Option<String>,
    pub view: Option<String>,
}

impl FileCondition {
    /// Patterns match from the first character of the log name.
    pub fn matches(&self, log_name: &str) -> bool {
        self.pattern.is_match(log_name)
    }
}

/// Ordered per-filename overrides for the filter and view.
#[derive(Debug, Clone, Default)]
pub struct FileConditions {
    conditions: Vec<FileCondition>,
}

impl FileConditions {
    /// Load the conditions file, treating any failure as "no conditions".
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::read(path) {
            Ok(conditions) => conditions,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load file conditions");
                Self::default()
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConditionsError> {
        let s = fs::read_to_string(path).map_err(|source| ConditionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&s)
    }

    pub fn from_yaml(s: &str) -> Result<Self, ConditionsError> {
        let file: Option<ConditionsFile> = serde_yaml::from_str(s)?;

        let conditions = file
            .unwrap_or_default()
            .conditions
            .into_iter()
            .filter_map(|raw| {
                let pattern = raw.filename_pattern?;
                Some((pattern, raw.filter, raw.view))
            })
            .map(|(pattern, filter, view)| {
                let anchored = Regex::new(&format!("^(?:{pattern})"))
                    .map_err(|source| ConditionsError::Pattern { pattern, source })?;
                Ok(FileCondition {
                    pattern: anchored,
                    filter,
                    view,
                })
            })
            .collect::<Result<Vec<_>, ConditionsError>>()?;

        Ok(Self { conditions })
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Filter name from the first matching condition that sets one.
    pub fn filter_for(&self, log_name: &str) -> Option<&str> {
        self.conditions
            .iter()
            .filter(|c| c.filter.is_some())
            .find(|c| c.matches(log_name))
            .and_then(|c| c.filter.as_deref())
    }

    /// View name from the first matching condition that sets one.
    pub fn view_for(&self, log_name: &str) -> Option<&str> {
        self.conditions
            .iter()
            .filter(|c| c.view.is_some())
            .find(|c| c.matches(log_name))
            .and_then(|c| c.view.as_deref())
    }
}
