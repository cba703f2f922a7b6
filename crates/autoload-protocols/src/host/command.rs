//! Command handlers and alias resolution.

use std::any::Any;

use super::Host;
use crate::error::CommandError;

/// A command in the host command table.
pub trait Command: Send + Sync {
    /// One-line usage text.
    fn usage(&self) -> &str;

    /// Longer help text, if any.
    fn help(&self) -> Option<&str> {
        None
    }

    /// Execute the command with its positional arguments.
    fn run(&self, host: &mut dyn Host, args: &[String]) -> Result<(), CommandError>;
}

/// Maps aliases and abbreviations to canonical command names.
pub trait AliasResolver: Send + Sync {
    /// Resolve `name`, or `None` if it names no command.
    fn resolve(&self, name: &str) -> Option<String>;

    /// Returns a reference to the resolver as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}
