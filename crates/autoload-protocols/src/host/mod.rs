//! Host collaborator interface.
//!
//! The engine never reaches into the host's internals: everything it reads
//! or extends goes through [`Host`].

mod command;
mod invocation;
mod listing;
mod settings;

pub use command::{AliasResolver, Command};
pub use invocation::Invocation;
pub use listing::CommandList;
pub use settings::{HostSettings, DEFAULT_DEPENDENCY_DIR};

use std::sync::Arc;

use crate::error::HostError;

/// Name of the host's help command.
pub const HELP_COMMAND: &str = "help";

/// Name of the host's install command.
pub const INSTALL_COMMAND: &str = "install";

/// Description of the exit listener that warns about exits during startup.
pub const EXIT_HANDLER_WARNING: &str = "exit handler never called";

/// The host program as seen by the autoload engine.
///
/// Implementations may be extended (new commands, appended listings, a
/// wrapped alias resolver) but existing entries are never removed or
/// overwritten.
pub trait Host {
    /// Host configuration.
    fn settings(&self) -> &HostSettings;

    /// The invocation the host is about to execute.
    fn invocation(&self) -> &Invocation;

    /// Mutable access to the invocation.
    fn invocation_mut(&mut self) -> &mut Invocation;

    /// Names in the command table, in registration order.
    fn command_names(&self) -> Vec<String>;

    /// Look up a command handler.
    fn command(&self, name: &str) -> Option<Arc<dyn Command>>;

    /// Insert a command. Fails if the name is already taken.
    fn register_command(&mut self, name: &str, command: Arc<dyn Command>)
    -> Result<(), HostError>;

    /// The master list of every command name.
    fn full_command_list(&mut self) -> &mut CommandList;

    /// Auxiliary listings used for help and usage enumeration.
    fn command_listings(&mut self) -> Vec<&mut CommandList>;

    /// The current alias resolver.
    fn alias_resolver(&self) -> Arc<dyn AliasResolver>;

    /// Replace the alias resolver.
    fn set_alias_resolver(&mut self, resolver: Arc<dyn AliasResolver>);

    /// Map an alias or abbreviation to a canonical command name.
    fn deref(&self, name: &str) -> Option<String> {
        self.alias_resolver().resolve(name)
    }

    /// Drop exit listeners registered under `description`. Returns how many were removed.
    fn remove_exit_listeners(&mut self, description: &str) -> usize;

    /// Run exit listeners and terminate the process.
    fn exit(&mut self, code: i32) -> !;
}
