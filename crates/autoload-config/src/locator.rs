//! Config file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::format::{ConfigFormat, FORMATS};

/// Base name of autoload config files, completed by a format suffix.
pub const AUTOLOAD_BASENAME: &str = "autoload.";

/// A config file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedConfig {
    pub path: PathBuf,
    pub format: ConfigFormat,
}

/// Finds the autoload config file of a scope directory.
pub struct ConfigLocator;

impl ConfigLocator {
    /// Candidate path for `format` in `dir`, with an optional file name prefix.
    pub fn candidate(dir: &Path, prefix: Option<&str>, format: ConfigFormat) -> PathBuf {
        dir.join(format!(
            "{}{}{}",
            prefix.unwrap_or_default(),
            AUTOLOAD_BASENAME,
            format.suffix()
        ))
    }

    /// Return the first existing config file in precedence order.
    ///
    /// Only one file is ever selected; later formats are not merged in.
    pub fn locate(dir: &Path, prefix: Option<&str>) -> Option<LocatedConfig> {
        for format in FORMATS {
            let path = Self::candidate(dir, prefix, format);
            if path.is_file() {
                debug!(path = %path.display(), "Found autoload config");
                return Some(LocatedConfig { path, format });
            }
        }
        debug!(dir = %dir.display(), "No autoload config present");
        None
    }
}
