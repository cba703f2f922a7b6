//! End-to-end tests for a full autoload pass.
//!
//! Each test lays out project and global config files in a temp directory,
//! runs a pass against a fresh `CommandHost` and checks what the host sees.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::TempDir;

use autoload_core::host::{COMMANDS_LISTING, PLUMBING_LISTING};
use autoload_core::{
    AutoloadOptions, Autoloader, CommandHost, ExtensionAliasResolver, LinkedModule, ModuleCatalog,
};
use autoload_protocols::{
    AutoloadError, Command, CommandError, Host, HostSettings, Invocation, ModuleId,
    CONVENTIONAL_HOOK,
};

// ============================================================================
// Test Helpers
// ============================================================================

struct Named(&'static str);

impl Command for Named {
    fn usage(&self) -> &str {
        self.0
    }

    fn run(&self, _host: &mut dyn Host, _args: &[String]) -> Result<(), CommandError> {
        Ok(())
    }
}

/// Linked module registering `commands` from its conventional hook.
fn registering(name: &str, commands: &'static [&'static str], calls: Arc<AtomicUsize>) -> LinkedModule {
    LinkedModule::new(name).with_hook(CONVENTIONAL_HOOK, move |host, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        for &command in commands {
            host.register_command(command, Arc::new(Named(command)))?;
        }
        Ok(())
    })
}

struct Workspace {
    dir: TempDir,
    catalog: Arc<ModuleCatalog>,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            catalog: Arc::new(ModuleCatalog::new()),
        }
    }

    fn project(&self) -> &Path {
        self.dir.path()
    }

    fn global_etc(&self) -> std::path::PathBuf {
        self.dir.path().join("global/etc")
    }

    fn host(&self) -> CommandHost {
        CommandHost::new(HostSettings::new(self.project(), self.dir.path().join("global")))
    }

    fn autoloader(&self) -> Autoloader {
        Autoloader::new(self.catalog.clone(), AutoloadOptions::default())
    }

    fn write(&self, dir: &Path, file: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
    }
}

// ============================================================================
// Pass behaviour
// ============================================================================

#[test]
fn test_no_config_performs_no_extension_mutation() {
    let ws = Workspace::new();
    let mut host = ws.host();
    let before = host.command_names();
    let mut autoloader = Autoloader::new(
        ws.catalog.clone(),
        AutoloadOptions::default().with_skip(true),
    );

    autoloader.run(&mut host).unwrap();
    assert_eq!(host.command_names(), before);

    let mut autoloader = ws.autoloader();
    let report = autoloader.run(&mut host).unwrap();
    assert!(report.invoked.is_empty());
    assert_eq!(report.warnings, 0);
    assert_eq!(report.added_commands, vec!["autoload-noop", "autoload-test"]);
}

#[test]
fn test_hook_runs_once_for_project_and_global_entries() {
    let ws = Workspace::new();
    let calls = Arc::new(AtomicUsize::new(0));
    ws.catalog
        .register(registering("shared", &["shared-cmd"], calls.clone()))
        .unwrap();
    ws.write(ws.project(), "autoload.yaml", "- shared\n");
    ws.write(&ws.global_etc(), "autoload.json", r#"["shared"]"#);

    let mut host = ws.host();
    let report = ws.autoloader().run(&mut host).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.invoked, vec![ModuleId::linked("shared")]);
    assert_eq!(report.warnings, 0);
}

#[test]
fn test_same_file_module_through_two_references() {
    let ws = Workspace::new();
    let manifest = "commands:\n  - name: lint\n    usage: lint\n    exec: [\"true\"]\n";
    ws.write(&ws.project().join("extensions/lint"), "extension.yaml", manifest);
    ws.write(ws.project(), "autoload.yaml", "- lint\n- ./extensions/lint\n");

    let mut host = ws.host();
    let report = ws.autoloader().run(&mut host).unwrap();
    assert_eq!(report.invoked.len(), 1);
    assert_eq!(report.warnings, 0);
    assert!(host.command("lint").is_some());
}

#[test]
fn test_required_failure_aborts_outside_bootstrap() {
    let ws = Workspace::new();
    ws.write(ws.project(), "autoload.yaml", "- +missing-ext\n");
    let mut host = ws.host();
    host.set_invocation(Invocation::new("commands", Vec::new()));

    let err = ws.autoloader().run(&mut host).unwrap_err();
    assert!(matches!(err, AutoloadError::Required { .. }));
    assert_ne!(err.exit_code(), 0);
    assert_eq!(
        err.to_string(),
        "Module missing-ext is marked as required, bailing"
    );
}

#[test]
fn test_required_failure_suppressed_during_bootstrap() {
    let ws = Workspace::new();
    ws.write(ws.project(), "autoload.yaml", "- +missing-ext\n");
    let mut host = ws.host();
    host.set_invocation(host.parse(&["i".to_string()], false));

    let report = ws.autoloader().run(&mut host).unwrap();
    assert_eq!(report.suppressed, 1);
    assert_eq!(report.warnings, 0);
}

#[test]
fn test_bootstrap_does_not_apply_once_dependencies_exist() {
    let ws = Workspace::new();
    ws.write(ws.project(), "autoload.yaml", "- +missing-ext\n");
    fs::create_dir_all(ws.project().join("extensions")).unwrap();
    let mut host = ws.host();
    host.set_invocation(Invocation::new("install", Vec::new()));

    assert!(ws.autoloader().run(&mut host).is_err());
}

#[test]
fn test_required_failure_in_global_scope_aborts_during_bootstrap() {
    let ws = Workspace::new();
    ws.write(&ws.global_etc(), "autoload.yaml", "- +missing-ext\n");
    let mut host = ws.host();
    host.set_invocation(Invocation::new("install", Vec::new()));

    assert!(ws.autoloader().run(&mut host).is_err());
}

// ============================================================================
// Command table patching
// ============================================================================

#[test]
fn test_new_commands_listed_once_and_not_abbreviated() {
    let ws = Workspace::new();
    let calls = Arc::new(AtomicUsize::new(0));
    ws.catalog
        .register(registering("foobar", &["foo", "bar"], calls))
        .unwrap();
    ws.write(ws.project(), "autoload.yaml", "- foobar\n");

    let mut host = ws.host();
    let report = ws.autoloader().run(&mut host).unwrap();
    assert!(report.added_commands.contains(&"foo".to_string()));

    for name in ["foo", "bar"] {
        for listing in [COMMANDS_LISTING, PLUMBING_LISTING] {
            let listing = host.listing(listing).unwrap();
            assert_eq!(listing.names().iter().filter(|n| *n == name).count(), 1);
        }
        assert_eq!(
            host.full_list().names().iter().filter(|n| *n == name).count(),
            1
        );
    }

    assert_eq!(host.deref("foo").as_deref(), Some("foo"));
    let resolver = host.alias_resolver();
    assert!(resolver.as_any().downcast_ref::<ExtensionAliasResolver>().is_some());
}

#[test]
fn test_help_foo_runs_foo() {
    let ws = Workspace::new();
    let calls = Arc::new(AtomicUsize::new(0));
    ws.catalog
        .register(registering("foo-ext", &["foo"], calls))
        .unwrap();
    ws.write(ws.project(), "autoload.yaml", "- foo-ext\n");

    let mut host = ws.host();
    let invocation = host.parse(&["foo".to_string()], false);
    assert!(invocation.is_help());
    host.set_invocation(invocation);

    ws.autoloader().run(&mut host).unwrap();
    assert_eq!(host.invocation().command, "foo");
    assert!(host.invocation().args.is_empty());
    host.dispatch().unwrap();
}

#[test]
fn test_builtins_dispatch() {
    let ws = Workspace::new();
    let mut host = ws.host();
    ws.autoloader().run(&mut host).unwrap();

    assert_eq!(host.deref("autoload-test").as_deref(), Some("autoload-test"));
    host.set_invocation(Invocation::new("autoload-test", Vec::new()));
    host.dispatch().unwrap();
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_required_success_and_optional_miss() {
    let ws = Workspace::new();
    let calls = Arc::new(AtomicUsize::new(0));
    ws.catalog
        .register(registering("core-ext", &["core"], calls.clone()))
        .unwrap();
    ws.write(
        ws.project(),
        "autoload.yaml",
        "- +core-ext\n- module: not-installed\n  required: false\n",
    );

    let mut host = ws.host();
    let report = ws.autoloader().run(&mut host).unwrap();
    assert_eq!(report.warnings, 1);
    assert_eq!(report.suppressed, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(host.command("core").is_some());
}

#[test]
fn test_malformed_file_is_skipped() {
    let ws = Workspace::new();
    let calls = Arc::new(AtomicUsize::new(0));
    ws.catalog
        .register(registering("global-ext", &["g"], calls.clone()))
        .unwrap();
    ws.write(ws.project(), "autoload.yaml", "module: not-a-list\n");
    ws.write(&ws.global_etc(), "autoload.yaml", "- global-ext\n- 42\n");

    let mut host = ws.host();
    let report = ws.autoloader().run(&mut host).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.warnings, 0);
}
