//! Error types for nasgen

use thiserror::Error;

/// Error type shared by the configuration and logging layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or inconsistent configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization failed.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}
