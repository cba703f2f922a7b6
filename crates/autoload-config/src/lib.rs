//! # Autoload Config
//!
//! Locating and parsing autoload config files, plus the host settings file.

mod env;
mod error;
mod format;
mod locator;
mod parser;
mod settings;

pub use env::{autoload_disabled, debug_enabled, DEBUG_ENV, SKIP_ENV};
pub use error::ConfigError;
pub use format::{ConfigFormat, FORMATS};
pub use locator::{ConfigLocator, LocatedConfig, AUTOLOAD_BASENAME};
pub use parser::EntryParser;
pub use settings::{
    default_global_prefix, AutoloadSection, HostConfig, HostSection, SettingsLoader,
    SETTINGS_FILE,
};
