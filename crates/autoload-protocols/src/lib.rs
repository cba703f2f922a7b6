//! # Autoload Protocols
//!
//! Core protocol definitions for the autoload engine.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`Host`] - The host program's command table and invocation, as seen by the engine
//! - [`Module`] - A loaded extension module, probed for registration hooks
//! - [`Command`] - A command handler living in the host command table
//! - [`AliasResolver`] - Maps abbreviations and aliases to canonical command names

pub mod entry;
pub mod error;
pub mod host;
pub mod module;

pub use entry::{AutoloadEntry, Scope, ScopeKind};
pub use error::{AutoloadError, CommandError, FailureKind, HookError, HostError};
pub use host::{
    AliasResolver, Command, CommandList, Host, HostSettings, Invocation, DEFAULT_DEPENDENCY_DIR,
    EXIT_HANDLER_WARNING, HELP_COMMAND, INSTALL_COMMAND,
};
pub use module::{HookFn, Module, ModuleId, CONVENTIONAL_HOOK};
