mod conditions;
mod error;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use conditions::{ConditionsError, FileCondition, FileConditions};
pub use error::ConfigError;
pub use loader::{DEFAULT_CONFIG_PATH, load_config, parse_config, read_config, validate_config};
pub use types::{GeneralConfig, LogviewConfig, ObjectStoreConfig, ServerConfig};
