//! Module resolution and loading.

mod catalog;
mod loader;
mod manifest;
mod resolver;

pub use catalog::{CatalogError, LinkedModule, ModuleCatalog, ModuleFactory};
pub use loader::ModuleLoader;
pub use manifest::{CommandSpec, ExecCommand, ExtensionManifest, ManifestModule, MANIFEST_BASENAME};
pub use resolver::{ModuleResolver, ModuleSource, ResolvedModule};
