//! Commands every host provides.

use std::fs;
use std::path::Path;

use tracing::info;

use autoload_protocols::{Command, CommandError, Host, HostError};

pub const LIST_COMMAND: &str = "commands";

/// `help [<command>]`
pub struct HelpCommand;

impl HelpCommand {
    fn print_overview(host: &mut dyn Host) {
        println!("Usage: autoload <command>\n");
        println!("where <command> is one of:");
        println!("    {}", host.full_command_list().names().join(", "));
        println!("\nautoload help <command>   help on <command>");
    }
}

impl Command for HelpCommand {
    fn usage(&self) -> &str {
        "help [<command>]"
    }

    fn run(&self, host: &mut dyn Host, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            if let Some(token) = host.invocation().unresolved.clone() {
                println!("Unknown command: \"{}\"\n", token);
            }
            Self::print_overview(host);
            return Ok(());
        }

        let name = host.deref(&args[0]).unwrap_or_else(|| args[0].clone());
        let command = host
            .command(&name)
            .ok_or_else(|| HostError::UnknownCommand(args[0].clone()))?;
        println!("autoload {}", command.usage());
        if let Some(help) = command.help() {
            println!("\n{}", help);
        }
        Ok(())
    }
}

/// `install [<dir>...]`: create the dependency directory and copy extensions into it.
pub struct InstallCommand;

impl Command for InstallCommand {
    fn usage(&self) -> &str {
        "install [<dir>...]"
    }

    fn help(&self) -> Option<&str> {
        Some(
            "Creates the project's dependency directory. Each <dir> is copied into it \
             under its own name, making its extension manifest resolvable by name.",
        )
    }

    fn run(&self, host: &mut dyn Host, args: &[String]) -> Result<(), CommandError> {
        let target = if host.settings().global {
            host.settings().global_prefix.join(&host.settings().dependency_dir)
        } else {
            host.settings().project_dependency_dir()
        };
        fs::create_dir_all(&target)?;

        for arg in args {
            let source = Path::new(arg);
            let name = source.file_name().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("cannot install {}", arg),
                )
            })?;
            copy_dir(source, &target.join(name))?;
            info!(extension = %arg, into = %target.display(), "Installed extension");
        }

        println!("{}", target.display());
        Ok(())
    }
}

fn copy_dir(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let dest = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), dest)?;
        }
    }
    Ok(())
}

/// `commands`: print every known command.
pub struct ListCommand;

impl Command for ListCommand {
    fn usage(&self) -> &str {
        "commands"
    }

    fn run(&self, host: &mut dyn Host, _args: &[String]) -> Result<(), CommandError> {
        for name in host.full_command_list().names() {
            println!("{}", name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CommandHost;
    use autoload_protocols::HostSettings;
    use tempfile::TempDir;

    #[test]
    fn test_install_creates_dependency_dir() {
        let dir = TempDir::new().unwrap();
        let mut host = CommandHost::new(HostSettings::new(dir.path(), dir.path().join("g")));

        InstallCommand.run(&mut host, &[]).unwrap();
        assert!(dir.path().join("extensions").is_dir());
    }

    #[test]
    fn test_install_copies_extension_dir() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src/lint");
        fs::create_dir_all(source.join("bin")).unwrap();
        fs::write(source.join("extension.yaml"), "commands: []\n").unwrap();
        fs::write(source.join("bin/lint"), "#!/bin/sh\n").unwrap();
        let mut host = CommandHost::new(HostSettings::new(dir.path(), dir.path().join("g")));

        InstallCommand
            .run(&mut host, &[source.display().to_string()])
            .unwrap();
        assert!(dir.path().join("extensions/lint/extension.yaml").is_file());
        assert!(dir.path().join("extensions/lint/bin/lint").is_file());
    }

    #[test]
    fn test_install_global() {
        let dir = TempDir::new().unwrap();
        let settings = HostSettings::new(dir.path().join("p"), dir.path().join("g")).with_global(true);
        let mut host = CommandHost::new(settings);

        InstallCommand.run(&mut host, &[]).unwrap();
        assert!(dir.path().join("g/extensions").is_dir());
        assert!(!dir.path().join("p/extensions").exists());
    }

    #[test]
    fn test_help_unknown_command() {
        let mut host = CommandHost::new(HostSettings::new("/proj", "/usr/local"));
        let result = HelpCommand.run(&mut host, &["nope".to_string()]);
        assert!(matches!(
            result,
            Err(CommandError::Host(HostError::UnknownCommand(_)))
        ));
    }

    #[test]
    fn test_help_known_command() {
        let mut host = CommandHost::new(HostSettings::new("/proj", "/usr/local"));
        assert!(HelpCommand.run(&mut host, &["inst".to_string()]).is_ok());
        assert!(HelpCommand.run(&mut host, &[]).is_ok());
    }
}
