//! Loaded extension modules.

use std::sync::Arc;

use crate::error::HookError;
use crate::host::Host;

/// Hook probed for when an entry does not name one.
pub const CONVENTIONAL_HOOK: &str = "autoload";

/// Registration hook: receives the host and the resolved command name.
pub type HookFn = Arc<dyn Fn(&mut dyn Host, &str) -> Result<(), HookError> + Send + Sync>;

/// Canonical identity of a module (resolved path, or `linked:<name>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity of a module compiled into the host.
    pub fn linked(name: &str) -> Self {
        Self(format!("linked:{}", name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_linked(&self) -> bool {
        self.0.starts_with("linked:")
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A loaded extension module.
///
/// Hooks are probed by name rather than called directly, so a module only
/// has to expose the hooks it actually provides.
pub trait Module: Send + Sync {
    /// Canonical identity of this module.
    fn id(&self) -> &ModuleId;

    /// Look up a hook by name.
    fn hook(&self, name: &str) -> Option<HookFn>;

    /// Names of all hooks this module exposes.
    fn hook_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether this module exposes the conventional hook.
    fn has_conventional_hook(&self) -> bool {
        self.hook(CONVENTIONAL_HOOK).is_some()
    }
}
