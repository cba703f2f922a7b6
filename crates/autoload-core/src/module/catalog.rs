//! Catalog of modules compiled into the host.

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use autoload_protocols::{HookError, HookFn, Host, Module, ModuleId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Module already registered: {0}")]
    AlreadyRegistered(String),
}

/// Builds a linked module when it is first loaded.
pub type ModuleFactory = Arc<dyn Fn() -> Result<Arc<dyn Module>, String> + Send + Sync>;

/// Linked modules by package name.
pub struct ModuleCatalog {
    factories: DashMap<String, ModuleFactory>,
}

impl ModuleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
        }
    }

    /// Register a ready-made module under its own name.
    pub fn register(&self, module: LinkedModule) -> Result<(), CatalogError> {
        let name = module.name().to_string();
        let module: Arc<dyn Module> = Arc::new(module);
        let factory: ModuleFactory =
            Arc::new(move || -> Result<Arc<dyn Module>, String> { Ok(module.clone()) });
        self.register_factory(name, factory)
    }

    /// Register a factory under `name`.
    pub fn register_factory(
        &self,
        name: impl Into<String>,
        factory: ModuleFactory,
    ) -> Result<(), CatalogError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(CatalogError::AlreadyRegistered(name));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Check if a module is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the module registered under `name`.
    pub fn instantiate(&self, name: &str) -> Option<Result<Arc<dyn Module>, String>> {
        let factory = self.factories.get(name)?.value().clone();
        Some(factory())
    }

    /// List registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ModuleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// A module whose hooks are plain Rust closures.
pub struct LinkedModule {
    name: String,
    id: ModuleId,
    hooks: HashMap<String, HookFn>,
}

impl LinkedModule {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: ModuleId::linked(&name),
            name,
            hooks: HashMap::new(),
        }
    }

    /// Expose `hook` under `name`.
    pub fn with_hook<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut dyn Host, &str) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.insert(name.into(), Arc::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Module for LinkedModule {
    fn id(&self) -> &ModuleId {
        &self.id
    }

    fn hook(&self, name: &str) -> Option<HookFn> {
        self.hooks.get(name).cloned()
    }

    fn hook_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.hooks.keys().cloned().collect();
        names.sort();
        names
    }
}
