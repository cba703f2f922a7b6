//! CLI definitions for autoload.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// autoload CLI.
///
/// Everything after the options is the command line handed to the host:
/// a command name followed by its arguments.
#[derive(Parser, Debug)]
#[command(name = "autoload")]
#[command(about = "Command host with declarative extension autoloading")]
#[command(version)]
#[command(disable_help_flag = true)]
pub(crate) struct Cli {
    /// Operate on the global install instead of the current project
    #[arg(short, long)]
    pub global: bool,

    /// Project root (default: current directory)
    #[arg(long)]
    pub prefix: Option<PathBuf>,

    /// Global install prefix; its `etc` directory holds the global autoload config
    #[arg(long)]
    pub global_prefix: Option<PathBuf>,

    /// Host settings file (default: <prefix>/autoload-host.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show help for the command
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// Command and its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub argv: Vec<String>,
}
