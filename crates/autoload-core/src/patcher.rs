//! Splices commands registered during a pass into the host.

use std::any::Any;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use autoload_protocols::{AliasResolver, Host};

/// Command table key set captured before a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSnapshot {
    names: HashSet<String>,
}

impl CommandSnapshot {
    pub fn capture(host: &dyn Host) -> Self {
        Self {
            names: host.command_names().into_iter().collect(),
        }
    }

    /// Commands present in `host` but not in the snapshot, in registration order.
    pub fn added_since(&self, host: &dyn Host) -> Vec<String> {
        host.command_names()
            .into_iter()
            .filter(|name| !self.names.contains(name))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Alias resolver that passes extension commands through unchanged.
///
/// Repeated patch passes extend the command set of an existing wrapper
/// instead of wrapping it again.
pub struct ExtensionAliasResolver {
    commands: BTreeSet<String>,
    inner: Arc<dyn AliasResolver>,
}

impl ExtensionAliasResolver {
    /// Wrap `current`, merging into it if it is already a wrapper.
    pub fn wrap(current: Arc<dyn AliasResolver>, added: &[String]) -> Self {
        match current.as_any().downcast_ref::<ExtensionAliasResolver>() {
            Some(existing) => Self {
                commands: existing
                    .commands
                    .iter()
                    .cloned()
                    .chain(added.iter().cloned())
                    .collect(),
                inner: existing.inner.clone(),
            },
            None => Self {
                commands: added.iter().cloned().collect(),
                inner: current,
            },
        }
    }

    pub fn commands(&self) -> &BTreeSet<String> {
        &self.commands
    }

    /// The resolver being delegated to.
    pub fn inner(&self) -> &Arc<dyn AliasResolver> {
        &self.inner
    }
}

impl AliasResolver for ExtensionAliasResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        if self.commands.contains(name) {
            return Some(name.to_string());
        }
        self.inner.resolve(name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registers newly added commands across the host.
pub struct CommandPatcher;

impl CommandPatcher {
    /// Patch `host` with every command added since `snapshot`.
    ///
    /// Returns the added command names.
    pub fn patch(host: &mut dyn Host, snapshot: &CommandSnapshot) -> Vec<String> {
        let added = snapshot.added_since(host);
        if added.is_empty() {
            debug!("No commands added, nothing to patch");
            return added;
        }

        for listing in host.command_listings() {
            listing.extend(added.iter().cloned());
        }
        host.full_command_list().extend(added.iter().cloned());

        let resolver = ExtensionAliasResolver::wrap(host.alias_resolver(), &added);
        host.set_alias_resolver(Arc::new(resolver));

        Self::rewrite_help_invocation(host, &added);

        info!(commands = ?added, "Registered extension commands");
        added
    }

    /// Point `help` invocations that name an extension command at it.
    pub fn rewrite_help_invocation(host: &mut dyn Host, added: &[String]) {
        if !host.invocation().is_help() {
            return;
        }

        let unresolved = host.invocation().unresolved.clone();
        if let Some(token) = unresolved.filter(|t| added.contains(t)) {
            let inv = host.invocation_mut();
            inv.unresolved = None;
            if inv.help_flag {
                // `<ext> --help`: keep `help`, with the command as its first argument.
                inv.args.insert(0, token);
            } else {
                debug!(command = %token, "Redirecting help fallback to extension command");
                inv.command = token;
                return;
            }
        }

        // An unknown command keeps the unknown-command notice.
        if host.invocation().unresolved.is_some() {
            return;
        }

        let Some(first) = host.invocation().args.first().cloned() else {
            return;
        };
        if !added.contains(&first) {
            return;
        }
        let Some(command) = host.command(&first) else {
            return;
        };
        if let Some(help) = command.help().filter(|h| *h != command.usage()) {
            let inv = host.invocation_mut();
            inv.usage_text = Some(help.to_string());
            inv.usage = true;
        }
    }
}

#[cfg(test)]
#[path = "patcher_tests.rs"]
mod tests;
