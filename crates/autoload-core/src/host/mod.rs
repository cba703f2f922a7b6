//! In-process implementation of the [`Host`] API.
//!
//! `CommandHost` owns a command table, the command listings, an alias
//! resolver and the parsed invocation. The binary builds one, lets the
//! autoload pass extend it, then dispatches.

mod alias;
mod commands;

pub use alias::AbbrevResolver;
pub use commands::{HelpCommand, InstallCommand, ListCommand, LIST_COMMAND};

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use autoload_protocols::{
    AliasResolver, Command, CommandError, CommandList, Host, HostError, HostSettings, Invocation,
    EXIT_HANDLER_WARNING, HELP_COMMAND, INSTALL_COMMAND,
};

/// Name of the auxiliary listing shown in help output.
pub const COMMANDS_LISTING: &str = "commands";

/// Name of the auxiliary listing for internal commands.
pub const PLUMBING_LISTING: &str = "plumbing";

type ExitListener = Box<dyn FnOnce(i32) + Send>;

/// Command table and invocation of the `autoload` program.
pub struct CommandHost {
    settings: HostSettings,
    invocation: Invocation,
    commands: HashMap<String, Arc<dyn Command>>,
    order: Vec<String>,
    full_list: CommandList,
    listings: Vec<CommandList>,
    resolver: Arc<dyn AliasResolver>,
    exit_listeners: Vec<(String, ExitListener)>,
}

impl CommandHost {
    pub fn new(settings: HostSettings) -> Self {
        let builtins: [(&str, Arc<dyn Command>); 3] = [
            (HELP_COMMAND, Arc::new(HelpCommand)),
            (INSTALL_COMMAND, Arc::new(InstallCommand)),
            (LIST_COMMAND, Arc::new(ListCommand)),
        ];

        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for (name, command) in builtins {
            commands.insert(name.to_string(), command);
            order.push(name.to_string());
        }

        let resolver = AbbrevResolver::new(order.iter().cloned())
            .with_alias("i", INSTALL_COMMAND)
            .with_alias("add", INSTALL_COMMAND)
            .with_alias("ls", LIST_COMMAND)
            .with_alias("h", HELP_COMMAND)
            .with_alias("?", HELP_COMMAND);

        let mut host = Self {
            settings,
            invocation: Invocation::new(HELP_COMMAND, Vec::new()),
            full_list: CommandList::new("full").with_names(order.iter().cloned()),
            listings: vec![
                CommandList::new(COMMANDS_LISTING).with_names(order.iter().cloned()),
                CommandList::new(PLUMBING_LISTING),
            ],
            commands,
            order,
            resolver: Arc::new(resolver),
            exit_listeners: Vec::new(),
        };
        host.on_exit(EXIT_HANDLER_WARNING, |code| {
            warn!(code, "{}", EXIT_HANDLER_WARNING);
        });
        host
    }

    pub fn set_invocation(&mut self, invocation: Invocation) {
        self.invocation = invocation;
    }

    /// Build an invocation from the positional tokens after the program name.
    ///
    /// `-h` and `--help` tokens are taken as the help flag.
    pub fn parse(&self, argv: &[String], help_flag: bool) -> Invocation {
        let mut help_flag = help_flag;
        let mut tokens = Vec::with_capacity(argv.len());
        for token in argv {
            if token == "-h" || token == "--help" {
                help_flag = true;
            } else {
                tokens.push(token.clone());
            }
        }

        let mut tokens = tokens.into_iter();
        let Some(first) = tokens.next() else {
            let inv = Invocation::new(HELP_COMMAND, Vec::new());
            return if help_flag { inv.with_help_flag() } else { inv };
        };
        let rest: Vec<String> = tokens.collect();

        let Some(command) = self.deref(&first) else {
            debug!(token = %first, "Unknown command, falling back to help");
            let inv = Invocation::unresolved(first, rest);
            return if help_flag { inv.with_help_flag() } else { inv };
        };

        if help_flag && command != HELP_COMMAND {
            let mut args = vec![command];
            args.extend(rest);
            return Invocation::new(HELP_COMMAND, args).with_help_flag();
        }
        let inv = Invocation::new(command, rest);
        if help_flag { inv.with_help_flag() } else { inv }
    }

    /// Register a listener run by [`Host::exit`].
    pub fn on_exit(&mut self, description: impl Into<String>, listener: impl FnOnce(i32) + Send + 'static) {
        self.exit_listeners
            .push((description.into(), Box::new(listener)));
    }

    pub fn exit_listener_count(&self) -> usize {
        self.exit_listeners.len()
    }

    /// Auxiliary listing by name.
    pub fn listing(&self, name: &str) -> Option<&CommandList> {
        self.listings.iter().find(|l| l.name() == name)
    }

    pub fn full_list(&self) -> &CommandList {
        &self.full_list
    }

    /// Execute the current invocation.
    ///
    /// Startup is over once dispatch returns, so the exit warning listener
    /// is dropped either way.
    pub fn dispatch(&mut self) -> Result<(), CommandError> {
        let invocation = self.invocation.clone();
        let result = if invocation.usage {
            self.print_usage(&invocation)
        } else {
            match self.command(&invocation.command) {
                Some(command) => command.run(self, &invocation.args),
                None => Err(HostError::UnknownCommand(invocation.command.clone()).into()),
            }
        };
        self.remove_exit_listeners(EXIT_HANDLER_WARNING);
        result
    }

    fn print_usage(&self, invocation: &Invocation) -> Result<(), CommandError> {
        if let Some(text) = &invocation.usage_text {
            println!("{}", text);
            return Ok(());
        }
        let name = match invocation.args.first() {
            Some(first) if invocation.is_help() => first,
            _ => &invocation.command,
        };
        let command = self
            .command(name)
            .ok_or_else(|| HostError::UnknownCommand(name.clone()))?;
        println!("autoload {}", command.usage());
        Ok(())
    }
}

impl Host for CommandHost {
    fn settings(&self) -> &HostSettings {
        &self.settings
    }

    fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    fn invocation_mut(&mut self) -> &mut Invocation {
        &mut self.invocation
    }

    fn command_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn command(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    fn register_command(
        &mut self,
        name: &str,
        command: Arc<dyn Command>,
    ) -> Result<(), HostError> {
        if self.commands.contains_key(name) {
            return Err(HostError::CommandExists(name.to_string()));
        }
        self.commands.insert(name.to_string(), command);
        self.order.push(name.to_string());
        Ok(())
    }

    fn full_command_list(&mut self) -> &mut CommandList {
        &mut self.full_list
    }

    fn command_listings(&mut self) -> Vec<&mut CommandList> {
        self.listings.iter_mut().collect()
    }

    fn alias_resolver(&self) -> Arc<dyn AliasResolver> {
        self.resolver.clone()
    }

    fn set_alias_resolver(&mut self, resolver: Arc<dyn AliasResolver>) {
        self.resolver = resolver;
    }

    fn remove_exit_listeners(&mut self, description: &str) -> usize {
        let before = self.exit_listeners.len();
        self.exit_listeners.retain(|(d, _)| d != description);
        before - self.exit_listeners.len()
    }

    fn exit(&mut self, code: i32) -> ! {
        for (_, listener) in self.exit_listeners.drain(..) {
            listener(code);
        }
        std::process::exit(code)
    }
}
