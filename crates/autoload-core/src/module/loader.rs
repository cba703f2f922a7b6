//! Module loading with a per-run cache.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use autoload_protocols::{AutoloadError, Module, ModuleId};

use super::catalog::ModuleCatalog;
use super::manifest::ManifestModule;
use super::resolver::{ModuleSource, ResolvedModule};

/// Loads resolved modules, at most once per identity.
pub struct ModuleLoader {
    catalog: Arc<ModuleCatalog>,
    loaded: HashMap<ModuleId, Arc<dyn Module>>,
}

impl ModuleLoader {
    pub fn new(catalog: Arc<ModuleCatalog>) -> Self {
        Self {
            catalog,
            loaded: HashMap::new(),
        }
    }

    /// Load `resolved`, reusing an earlier load of the same identity.
    pub fn load(&mut self, resolved: &ResolvedModule) -> Result<Arc<dyn Module>, AutoloadError> {
        if let Some(module) = self.loaded.get(&resolved.id) {
            debug!(module = %resolved.id, "Module already loaded");
            return Ok(module.clone());
        }

        let module: Arc<dyn Module> = match &resolved.source {
            ModuleSource::Linked(name) => self
                .catalog
                .instantiate(name)
                .unwrap_or_else(|| Err(format!("{} is not in the module catalog", name)))
                .map_err(|reason| load_error(&resolved.id, reason))?,
            ModuleSource::File(path) => Arc::new(
                ManifestModule::load(resolved.id.clone(), path)
                    .map_err(|reason| load_error(&resolved.id, reason))?,
            ),
        };

        debug!(module = %resolved.id, hooks = ?module.hook_names(), "Loaded module");
        self.loaded.insert(resolved.id.clone(), module.clone());
        Ok(module)
    }

    /// Whether `id` has been loaded.
    pub fn is_loaded(&self, id: &ModuleId) -> bool {
        self.loaded.contains_key(id)
    }
}

fn load_error(id: &ModuleId, reason: String) -> AutoloadError {
    AutoloadError::Load {
        id: id.clone(),
        reason,
    }
}
