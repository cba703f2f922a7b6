//! autoload - command host with declarative extension autoloading
//!
//! Main entry point: parse the command line, run the autoload pass, then
//! dispatch the requested command.

mod cli;
mod register;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use autoload_config::{autoload_disabled, debug_enabled, HostConfig, SettingsLoader, SETTINGS_FILE};
use autoload_core::{AutoloadOptions, Autoloader, CommandHost};
use autoload_protocols::{Host, HostSettings};

use cli::Cli;

fn init_tracing() {
    let default_level = if debug_enabled() { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Settings file path: `--config`, else the project's settings file.
fn settings_path(cli: &Cli, project: &Path) -> PathBuf {
    cli.config
        .clone()
        .unwrap_or_else(|| project.join(SETTINGS_FILE))
}

/// Merge the settings file with command line overrides.
fn resolve_settings(cli: &Cli, project: &Path, config: &HostConfig) -> anyhow::Result<HostSettings> {
    let mut settings = config
        .to_settings(project)
        .context("Invalid host settings")?;
    if cli.global {
        settings.global = true;
    }
    if let Some(prefix) = &cli.global_prefix {
        settings.global_prefix = prefix.clone();
    }
    Ok(settings)
}

fn autoload_options(config: &HostConfig) -> AutoloadOptions {
    let options = AutoloadOptions::default().with_skip(config.autoload.skip || autoload_disabled());
    match config.autoload.config_prefix.as_deref() {
        Some(prefix) => options.with_config_prefix(prefix),
        None => options,
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let project = match &cli.prefix {
        Some(prefix) => prefix.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let path = settings_path(&cli, &project);
    let config = SettingsLoader::load_or_default(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let settings = resolve_settings(&cli, &project, &config)?;
    debug!(?settings, "Host settings");

    let mut host = CommandHost::new(settings);
    let invocation = host.parse(&cli.argv, cli.help);
    host.set_invocation(invocation);

    let catalog = register::build_catalog()?;
    let mut autoloader = Autoloader::new(catalog.clone(), autoload_options(&config));
    if let Some(Ok(info)) = catalog.instantiate(register::INFO_MODULE) {
        autoloader.preload(info);
    }
    autoloader.run_or_exit(&mut host);

    if let Err(e) = host.dispatch() {
        error!("{}", e);
        host.exit(1);
    }
    Ok(())
}
