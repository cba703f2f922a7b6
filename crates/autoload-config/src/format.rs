//! Supported config file formats.

use std::path::Path;

use crate::error::ConfigError;

/// A config file suffix paired with its decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Yml,
    Json,
}

/// Formats in lookup precedence order.
pub const FORMATS: [ConfigFormat; 3] = [ConfigFormat::Yaml, ConfigFormat::Yml, ConfigFormat::Json];

impl ConfigFormat {
    pub fn suffix(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Yml => "yml",
            ConfigFormat::Json => "json",
        }
    }

    /// Pick the format matching a file's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        FORMATS.into_iter().find(|f| f.suffix() == ext)
    }

    /// Decode `content` into a generic value.
    pub fn decode(self, content: &str) -> Result<serde_json::Value, ConfigError> {
        match self {
            ConfigFormat::Yaml | ConfigFormat::Yml => Ok(serde_yml::from_str(content)?),
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    /// Decode `content` straight into a typed value.
    pub fn decode_as<T: serde::de::DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        match self {
            ConfigFormat::Yaml | ConfigFormat::Yml => Ok(serde_yml::from_str(content)?),
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}
