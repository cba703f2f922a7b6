//! The autoload pass.
//!
//! One pass registers the built-ins, runs every entry of the project and
//! global config files, lets preloaded modules register themselves, then
//! patches the host with whatever commands appeared.

use std::sync::Arc;

use tracing::{debug, info, warn};

use autoload_config::EntryParser;
use autoload_protocols::{
    AutoloadError, Host, HostSettings, Module, ModuleId, Scope, CONVENTIONAL_HOOK,
    EXIT_HANDLER_WARNING,
};

use crate::builtins::register_builtins;
use crate::classifier::{BootstrapProbe, Disposition, FailureClassifier};
use crate::module::ModuleCatalog;
use crate::patcher::{CommandPatcher, CommandSnapshot};
use crate::pipeline::{self, EntryOutcome, EntryPipeline};
use crate::state::LoadState;

/// Pass options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoloadOptions {
    /// Prepended to the config file name, e.g. `.` for `.autoload.yaml`.
    pub config_prefix: Option<String>,
    /// Skip the pass entirely.
    pub skip: bool,
}

impl AutoloadOptions {
    pub fn with_config_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.config_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }
}

/// Summary of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoloadReport {
    /// Modules whose hook ran during this pass, in order.
    pub invoked: Vec<ModuleId>,
    /// Failures logged as warnings.
    pub warnings: usize,
    /// Failures muted by a bootstrap pass.
    pub suppressed: usize,
    /// Commands spliced into the host.
    pub added_commands: Vec<String>,
    /// The pass was disabled.
    pub skipped: bool,
}

/// Runs autoload passes against a host.
///
/// Hook bookkeeping lives as long as the `Autoloader`, so a module's hook
/// runs at most once across every pass it performs.
pub struct Autoloader {
    catalog: Arc<ModuleCatalog>,
    options: AutoloadOptions,
    state: LoadState,
    pipeline: Option<EntryPipeline>,
    preloaded: Vec<Arc<dyn Module>>,
}

impl Autoloader {
    pub fn new(catalog: Arc<ModuleCatalog>, options: AutoloadOptions) -> Self {
        Self {
            catalog,
            options,
            state: LoadState::new(),
            pipeline: None,
            preloaded: Vec::new(),
        }
    }

    /// Queue a module that registers itself unless an entry already ran it.
    pub fn preload(&mut self, module: Arc<dyn Module>) {
        self.preloaded.push(module);
    }

    /// Whether the hook of `id` already ran.
    pub fn has_run(&self, id: &ModuleId) -> bool {
        self.state.has_invoked(id)
    }

    /// Whether the engine itself located `id` through a config entry.
    pub fn was_resolved(&self, id: &ModuleId) -> bool {
        self.state.was_resolved(id)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The command the host is about to execute, looking through a `help`
    /// fallback over an unresolved token.
    pub fn effective_command(host: &dyn Host) -> String {
        let target = host.invocation().target();
        host.deref(target).unwrap_or_else(|| target.to_string())
    }

    /// Scopes consulted for `settings`, in processing order.
    pub fn scopes(settings: &HostSettings) -> Vec<Scope> {
        let global = Scope::global(settings.global_config_dir());
        if settings.global {
            vec![global]
        } else {
            vec![Scope::project(settings.local_prefix.clone()), global]
        }
    }

    /// Run one pass.
    ///
    /// Returns [`AutoloadError::Required`] when a required entry failed
    /// outside a bootstrap pass. Commands registered before the failure
    /// stay in place.
    pub fn run(&mut self, host: &mut dyn Host) -> Result<AutoloadReport, AutoloadError> {
        let mut report = AutoloadReport::default();
        if self.options.skip {
            info!("Autoload disabled, skipping");
            report.skipped = true;
            return Ok(report);
        }

        let snapshot = CommandSnapshot::capture(host);
        register_builtins(host);

        let command = Self::effective_command(host);
        debug!(command = %command, "Starting autoload pass");

        for scope in Self::scopes(host.settings()) {
            self.run_scope(host, &scope, &command, &mut report)?;
        }

        self.self_register_preloaded(host, &command, &mut report);

        report.added_commands = CommandPatcher::patch(host, &snapshot);
        info!(
            invoked = report.invoked.len(),
            warnings = report.warnings,
            suppressed = report.suppressed,
            "Autoload pass complete"
        );
        Ok(report)
    }

    /// Run one pass, ending the process if a required entry failed.
    pub fn run_or_exit(&mut self, host: &mut dyn Host) -> AutoloadReport {
        match self.run(host) {
            Ok(report) => report,
            Err(e) => {
                host.remove_exit_listeners(EXIT_HANDLER_WARNING);
                host.exit(e.exit_code().max(1))
            }
        }
    }

    /// Run the conventional hook of `module` unless it already ran.
    ///
    /// Returns `Ok(None)` when the engine resolved the module itself, since
    /// its config entry is responsible for the hook.
    pub fn self_register(
        &mut self,
        module: &dyn Module,
        host: &mut dyn Host,
        command: &str,
    ) -> Result<Option<EntryOutcome>, AutoloadError> {
        if self.was_resolved(module.id()) {
            debug!(module = %module.id(), "Loaded by autoload, not self-registering");
            return Ok(None);
        }
        if !module.has_conventional_hook() {
            return Ok(None);
        }
        pipeline::invoke(module, CONVENTIONAL_HOOK, &mut self.state, host, command).map(Some)
    }

    fn run_scope(
        &mut self,
        host: &mut dyn Host,
        scope: &Scope,
        command: &str,
        report: &mut AutoloadReport,
    ) -> Result<(), AutoloadError> {
        let Some(entries) = EntryParser::load(&scope.dir, self.options.config_prefix.as_deref())
        else {
            debug!(scope = %scope.kind, dir = %scope.dir.display(), "No autoload config");
            return Ok(());
        };

        let bootstrap = BootstrapProbe::detect(host, command, scope);
        if bootstrap {
            debug!(dir = %scope.dir.display(), "First install, muting entry failures");
        }

        let catalog = self.catalog.clone();
        let dependency_dir = host.settings().dependency_dir.clone();
        let pipeline = self
            .pipeline
            .get_or_insert_with(|| EntryPipeline::new(catalog, dependency_dir));

        for mut entry in entries {
            match pipeline.process(&mut entry, &mut self.state, host, command) {
                Ok(EntryOutcome::Invoked { id, .. }) => report.invoked.push(id),
                Ok(outcome) => debug!(module = %outcome.id(), "Nothing to invoke"),
                Err(err) => {
                    let disposition = FailureClassifier::classify(&entry, scope, bootstrap);
                    match disposition {
                        Disposition::ContinueWarn => report.warnings += 1,
                        Disposition::ContinueSuppress => report.suppressed += 1,
                        Disposition::Abort => {}
                    }
                    if let Some(fatal) = FailureClassifier::report(&err, &entry, disposition) {
                        return Err(fatal);
                    }
                }
            }
        }
        Ok(())
    }

    fn self_register_preloaded(
        &mut self,
        host: &mut dyn Host,
        command: &str,
        report: &mut AutoloadReport,
    ) {
        for module in std::mem::take(&mut self.preloaded) {
            match self.self_register(module.as_ref(), host, command) {
                Ok(Some(EntryOutcome::Invoked { id, .. })) => report.invoked.push(id),
                Ok(_) => {}
                Err(e) => {
                    warn!(module = %module.id(), "{}", e);
                    report.warnings += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
