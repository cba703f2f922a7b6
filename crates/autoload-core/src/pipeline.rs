//! Per-entry handling: resolve, load, pick the hook, invoke it.

use std::sync::Arc;

use tracing::debug;

use autoload_protocols::{
    AutoloadEntry, AutoloadError, HookError, Host, Module, ModuleId, CONVENTIONAL_HOOK,
};

use crate::module::{ModuleCatalog, ModuleLoader, ModuleResolver};
use crate::state::LoadState;

/// What happened to an entry that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The hook ran.
    Invoked { id: ModuleId, hook: String },
    /// The module's hook had already run in this process.
    AlreadyInvoked { id: ModuleId },
    /// The module was loaded but exposes no hook to run.
    Loaded { id: ModuleId },
}

impl EntryOutcome {
    pub fn id(&self) -> &ModuleId {
        match self {
            EntryOutcome::Invoked { id, .. }
            | EntryOutcome::AlreadyInvoked { id }
            | EntryOutcome::Loaded { id } => id,
        }
    }
}

/// Resolves, loads and invokes autoload entries.
pub struct EntryPipeline {
    resolver: ModuleResolver,
    loader: ModuleLoader,
}

impl EntryPipeline {
    pub fn new(catalog: Arc<ModuleCatalog>, dependency_dir: impl Into<String>) -> Self {
        Self {
            resolver: ModuleResolver::new(catalog.clone(), dependency_dir),
            loader: ModuleLoader::new(catalog),
        }
    }

    /// Handle one entry.
    ///
    /// When the entry names no hook and the module exposes the conventional
    /// hook that has not run yet, the entry adopts it as its `func`.
    pub fn process(
        &mut self,
        entry: &mut AutoloadEntry,
        state: &mut LoadState,
        host: &mut dyn Host,
        command: &str,
    ) -> Result<EntryOutcome, AutoloadError> {
        let resolved = self.resolver.resolve(&entry.module, entry.base_dir())?;
        let id = resolved.id.clone();
        state.record_resolved(id.clone());

        let module = self.loader.load(&resolved)?;

        if entry.func.is_none() && module.has_conventional_hook() && !state.has_invoked(&id) {
            entry.func = Some(CONVENTIONAL_HOOK.to_string());
        }
        let Some(func) = entry.func.clone() else {
            debug!(module = %id, "No hook to run");
            return Ok(EntryOutcome::Loaded { id });
        };

        invoke(module.as_ref(), &func, state, host, command)
    }
}

/// Run `func` on `module` unless a hook of this module already ran.
pub(crate) fn invoke(
    module: &dyn Module,
    func: &str,
    state: &mut LoadState,
    host: &mut dyn Host,
    command: &str,
) -> Result<EntryOutcome, AutoloadError> {
    let id = module.id().clone();
    if state.has_invoked(&id) {
        debug!(module = %id, hook = func, "Hook already ran, skipping");
        return Ok(EntryOutcome::AlreadyInvoked { id });
    }

    let hook = module.hook(func).ok_or_else(|| AutoloadError::Hook {
        func: func.to_string(),
        id: id.clone(),
        source: HookError::NotAHook(func.to_string()),
    })?;

    state.mark_invoked(id.clone());
    debug!(module = %id, hook = func, command, "Invoking hook");
    hook(host, command).map_err(|source| AutoloadError::Hook {
        func: func.to_string(),
        id: id.clone(),
        source,
    })?;

    Ok(EntryOutcome::Invoked {
        id,
        hook: func.to_string(),
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
