//! # Autoload Core
//!
//! The autoload engine and an in-process command host.
//!
//! ## Components
//!
//! - [`Autoloader`] - Sequences config discovery, loading and patching across scopes
//! - [`EntryPipeline`] - Resolves, loads and invokes the hook of one entry
//! - [`FailureClassifier`] - Decides whether an entry failure is fatal
//! - [`CommandPatcher`] - Splices newly registered commands into the host's listings
//! - [`CommandHost`] - A concrete [`Host`](autoload_protocols::Host)
//! - [`LoadState`] - Which modules were resolved and which hooks already ran

pub mod builtins;
pub mod classifier;
pub mod host;
pub mod module;
pub mod orchestrator;
pub mod patcher;
pub mod pipeline;
pub mod state;

pub use classifier::{BootstrapProbe, Disposition, FailureClassifier};
pub use host::{AbbrevResolver, CommandHost};
pub use module::{
    CatalogError, ExtensionManifest, LinkedModule, ManifestModule, ModuleCatalog, ModuleLoader,
    ModuleResolver, ModuleSource, ResolvedModule,
};
pub use orchestrator::{AutoloadOptions, AutoloadReport, Autoloader};
pub use patcher::{CommandPatcher, CommandSnapshot, ExtensionAliasResolver};
pub use pipeline::{EntryOutcome, EntryPipeline};
pub use state::LoadState;
