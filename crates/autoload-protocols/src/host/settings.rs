//! Host configuration exposed to the engine.

use std::path::PathBuf;

/// Directory extensions are installed into, relative to a prefix.
pub const DEFAULT_DEPENDENCY_DIR: &str = "extensions";

/// Host configuration as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSettings {
    /// The host operates on the global install rather than a project.
    pub global: bool,
    /// Project root.
    pub local_prefix: PathBuf,
    /// Global install prefix.
    pub global_prefix: PathBuf,
    /// Name of the dependency output directory under a prefix.
    pub dependency_dir: String,
}

impl HostSettings {
    pub fn new(local_prefix: impl Into<PathBuf>, global_prefix: impl Into<PathBuf>) -> Self {
        Self {
            global: false,
            local_prefix: local_prefix.into(),
            global_prefix: global_prefix.into(),
            dependency_dir: DEFAULT_DEPENDENCY_DIR.to_string(),
        }
    }

    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    pub fn with_dependency_dir(mut self, dir: impl Into<String>) -> Self {
        self.dependency_dir = dir.into();
        self
    }

    /// Directory holding the global scope's config file.
    pub fn global_config_dir(&self) -> PathBuf {
        self.global_prefix.join("etc")
    }

    /// The project's dependency output directory.
    pub fn project_dependency_dir(&self) -> PathBuf {
        self.local_prefix.join(&self.dependency_dir)
    }
}
