//! Autoload entries and configuration scopes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One requested extension, as declared in an autoload config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoloadEntry {
    /// Absolute path of the config file that declared this entry.
    #[serde(rename = "basePath")]
    pub base_path: PathBuf,

    /// Module reference: bare package name, relative path or absolute path.
    pub module: String,

    /// Name of the hook to invoke. Falls back to the conventional hook when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub func: Option<String>,

    /// Failures handling a required entry are fatal.
    #[serde(default)]
    pub required: bool,

    /// Implementation-specific fields passed through from the object form.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AutoloadEntry {
    /// Create an optional entry without an explicit hook.
    pub fn new(base_path: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            module: module.into(),
            func: None,
            required: false,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_func(mut self, func: impl Into<String>) -> Self {
        self.func = Some(func.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Directory module references are resolved from.
    pub fn base_dir(&self) -> &Path {
        self.base_path.parent().unwrap_or_else(|| Path::new("/"))
    }
}

/// Which configuration root a scope represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Project,
    Global,
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeKind::Project => write!(f, "project"),
            ScopeKind::Global => write!(f, "global"),
        }
    }
}

/// A configuration root consulted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Directory holding the scope's config file.
    pub dir: PathBuf,
}

impl Scope {
    pub fn project(dir: impl Into<PathBuf>) -> Self {
        Self {
            kind: ScopeKind::Project,
            dir: dir.into(),
        }
    }

    pub fn global(dir: impl Into<PathBuf>) -> Self {
        Self {
            kind: ScopeKind::Global,
            dir: dir.into(),
        }
    }

    pub fn is_project(&self) -> bool {
        self.kind == ScopeKind::Project
    }

    /// Commands registered while processing this scope come from a global install.
    pub fn is_global(&self) -> bool {
        self.kind == ScopeKind::Global
    }
}
