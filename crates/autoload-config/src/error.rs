//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("expecting array at top-level of {}", .0.display())]
    NotASequence(PathBuf),

    #[error("Invalid host setting {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment variable {0} referenced in settings is unset")]
    EnvVarNotSet(String),

    #[error("Cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid host settings TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}
