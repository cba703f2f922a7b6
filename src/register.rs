//! Modules linked into the autoload binary.

use std::sync::Arc;

use autoload_core::{CatalogError, LinkedModule, ModuleCatalog};
use autoload_protocols::{Command, CommandError, Host, CONVENTIONAL_HOOK};

/// Name of the diagnostics module and of the command it registers.
pub(crate) const INFO_MODULE: &str = "autoload-info";

/// `autoload-info`: print the host settings and the linked modules.
struct InfoCommand {
    linked: Vec<String>,
}

impl Command for InfoCommand {
    fn usage(&self) -> &str {
        "autoload-info"
    }

    fn help(&self) -> Option<&str> {
        Some("Shows the prefixes the host runs with and the modules linked into it.")
    }

    fn run(&self, host: &mut dyn Host, _args: &[String]) -> Result<(), CommandError> {
        let settings = host.settings();
        println!("global:         {}", settings.global);
        println!("prefix:         {}", settings.local_prefix.display());
        println!("global prefix:  {}", settings.global_prefix.display());
        println!("dependency dir: {}", settings.dependency_dir);
        println!("linked modules: {}", self.linked.join(", "));
        Ok(())
    }
}

pub(crate) fn info_module(linked: Vec<String>) -> LinkedModule {
    LinkedModule::new(INFO_MODULE).with_hook(CONVENTIONAL_HOOK, move |host, _command| {
        host.register_command(
            INFO_MODULE,
            Arc::new(InfoCommand {
                linked: linked.clone(),
            }),
        )?;
        Ok(())
    })
}

/// Build the catalog of linked modules.
pub(crate) fn build_catalog() -> Result<Arc<ModuleCatalog>, CatalogError> {
    let catalog = ModuleCatalog::new();
    catalog.register(info_module(vec![INFO_MODULE.to_string()]))?;
    Ok(Arc::new(catalog))
}
