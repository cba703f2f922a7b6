//! Errors raised while handling a single autoload entry.

use std::path::PathBuf;

use thiserror::Error;

use super::HookError;
use crate::module::ModuleId;

/// Which stage of entry handling failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Resolve,
    Load,
    Hook,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Resolve => write!(f, "resolve"),
            FailureKind::Load => write!(f, "load"),
            FailureKind::Hook => write!(f, "hook"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AutoloadError {
    #[error("Could not find module {module}")]
    Resolve { module: String, reason: String },

    #[error("Error importing module {id}: {reason}")]
    Load { id: ModuleId, reason: String },

    #[error("Error executing function {func} in module {id}: {source}")]
    Hook {
        func: String,
        id: ModuleId,
        #[source]
        source: HookError,
    },

    #[error("Module {module} is marked as required, bailing")]
    Required { module: String, config: PathBuf },
}

impl AutoloadError {
    /// The failing stage, if this error describes one.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            AutoloadError::Resolve { .. } => Some(FailureKind::Resolve),
            AutoloadError::Load { .. } => Some(FailureKind::Load),
            AutoloadError::Hook { .. } => Some(FailureKind::Hook),
            AutoloadError::Required { .. } => None,
        }
    }

    /// Why resolution failed; the message alone names only the module.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AutoloadError::Resolve { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Process exit status for errors that end the process.
    pub fn exit_code(&self) -> i32 {
        match self {
            AutoloadError::Required { .. } => 1,
            _ => 0,
        }
    }
}
