//! Host settings file.
//!
//! ```toml
//! [host]
//! global = false
//! global_prefix = "~/.autoload"
//! dependency_dir = "extensions"
//!
//! [autoload]
//! config_prefix = ""
//! skip = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use autoload_protocols::{HostSettings, DEFAULT_DEPENDENCY_DIR};

use crate::error::ConfigError;

/// Settings file looked up in the project root.
pub const SETTINGS_FILE: &str = "autoload-host.toml";

static ENV_VAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid")
});

/// Root of the host settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub host: HostSection,
    #[serde(default)]
    pub autoload: AutoloadSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSection {
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub global_prefix: Option<String>,
    #[serde(default = "default_dependency_dir")]
    pub dependency_dir: String,
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            global: false,
            global_prefix: None,
            dependency_dir: default_dependency_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoloadSection {
    /// File name prefix for autoload config files, e.g. `.`.
    #[serde(default)]
    pub config_prefix: Option<String>,
    #[serde(default)]
    pub skip: bool,
}

fn default_dependency_dir() -> String {
    DEFAULT_DEPENDENCY_DIR.to_string()
}

/// Default global prefix: `~/.autoload`, or `/usr/local` without a home directory.
pub fn default_global_prefix() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".autoload"))
        .unwrap_or_else(|| PathBuf::from("/usr/local"))
}

impl HostConfig {
    /// Build host settings for a project rooted at `local_prefix`.
    pub fn to_settings(&self, local_prefix: impl Into<PathBuf>) -> Result<HostSettings, ConfigError> {
        if self.host.dependency_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host.dependency_dir".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let global_prefix = self
            .host
            .global_prefix
            .as_deref()
            .map(|p| PathBuf::from(SettingsLoader::expand_path(p)))
            .unwrap_or_else(default_global_prefix);

        Ok(HostSettings::new(local_prefix, global_prefix)
            .with_global(self.host.global)
            .with_dependency_dir(self.host.dependency_dir.clone()))
    }
}

/// Host settings loader with environment variable substitution.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<HostConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load settings from a file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<HostConfig, ConfigError> {
        if !path.exists() {
            return Ok(HostConfig::default());
        }
        Self::load(path)
    }

    /// Load settings from a string.
    pub fn load_str(content: &str) -> Result<HostConfig, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: HostConfig = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Substitute `${VAR}` references from the environment.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand a leading `~` to the home directory.
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
