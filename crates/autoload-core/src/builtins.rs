//! Synthetic commands registered before any entry runs.

use std::sync::Arc;

use tracing::debug;

use autoload_protocols::{Command, CommandError, Host};

pub const NOOP_COMMAND: &str = "autoload-noop";
pub const TEST_COMMAND: &str = "autoload-test";

/// Does nothing. Useful as a placeholder or smoke test.
pub struct NoopCommand;

impl Command for NoopCommand {
    fn usage(&self) -> &str {
        "autoload-noop"
    }

    fn run(&self, _host: &mut dyn Host, _args: &[String]) -> Result<(), CommandError> {
        Ok(())
    }
}

/// Reports that dispatch reached an autoload-registered command.
pub struct TestCommand;

impl Command for TestCommand {
    fn usage(&self) -> &str {
        "autoload-test"
    }

    fn help(&self) -> Option<&str> {
        Some("Prints a line confirming that autoloaded commands are dispatched.")
    }

    fn run(&self, _host: &mut dyn Host, _args: &[String]) -> Result<(), CommandError> {
        println!("{} reached", TEST_COMMAND);
        Ok(())
    }
}

/// Register the synthetic commands that are not already present.
pub fn register_builtins(host: &mut dyn Host) {
    let builtins: [(&str, Arc<dyn Command>); 2] = [
        (NOOP_COMMAND, Arc::new(NoopCommand)),
        (TEST_COMMAND, Arc::new(TestCommand)),
    ];
    for (name, command) in builtins {
        if host.command(name).is_some() {
            debug!(command = name, "Built-in already present");
            continue;
        }
        if let Err(e) = host.register_command(name, command) {
            debug!(command = name, "Skipping built-in: {}", e);
        }
    }
}
