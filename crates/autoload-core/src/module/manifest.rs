//! Manifest-backed extension modules.
//!
//! ```yaml
//! name: deploy-tools
//! commands:
//!   - name: deploy
//!     usage: "deploy <env>"
//!     help: "Deploy the current project to <env>."
//!     exec: ["./bin/deploy"]
//! hooks:
//!   register-deploy: [deploy]
//! ```
//!
//! Without `hooks`, the manifest exposes only the conventional hook, which
//! registers every declared command.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Command as Process;
use std::sync::Arc;

use tracing::debug;

use autoload_config::ConfigFormat;
use autoload_protocols::{
    Command, CommandError, HookError, HookFn, Host, Module, ModuleId, CONVENTIONAL_HOOK,
};

/// File name of a directory module's manifest, completed by a format suffix.
pub const MANIFEST_BASENAME: &str = "extension";

/// A command declared by a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub usage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    pub exec: Vec<String>,
}

/// Extension manifest file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
    #[serde(default)]
    pub hooks: BTreeMap<String, Vec<String>>,
}

impl ExtensionManifest {
    /// Read and decode a manifest, picking the decoder from the file suffix.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            format!(
                "unsupported module format {}",
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "(none)".to_string())
            )
        })?;
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let manifest: Self = format.decode_as(&content).map_err(|e| e.to_string())?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check command names, exec lines and hook references.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for spec in &self.commands {
            if spec.name.trim().is_empty() {
                return Err("command with an empty name".to_string());
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(format!("command {} declared twice", spec.name));
            }
            if spec.exec.is_empty() {
                return Err(format!("command {} has an empty exec line", spec.name));
            }
        }
        for (hook, commands) in &self.hooks {
            if let Some(missing) = commands.iter().find(|c| !seen.contains(c.as_str())) {
                return Err(format!("hook {} names undeclared command {}", hook, missing));
            }
        }
        Ok(())
    }

    /// Commands registered by `hook`, or `None` if the hook does not exist.
    pub fn hook_commands(&self, hook: &str) -> Option<Vec<&CommandSpec>> {
        if self.hooks.is_empty() {
            return (hook == CONVENTIONAL_HOOK).then(|| self.commands.iter().collect());
        }
        let names = self.hooks.get(hook)?;
        Some(
            self.commands
                .iter()
                .filter(|spec| names.contains(&spec.name))
                .collect(),
        )
    }
}

/// A module loaded from a manifest file.
pub struct ManifestModule {
    id: ModuleId,
    dir: PathBuf,
    manifest: Arc<ExtensionManifest>,
}

impl ManifestModule {
    /// Load the manifest at `path`.
    pub fn load(id: ModuleId, path: &Path) -> Result<Self, String> {
        let manifest = ExtensionManifest::from_file(path)?;
        Ok(Self {
            id,
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            manifest: Arc::new(manifest),
        })
    }

    pub fn manifest(&self) -> &ExtensionManifest {
        &self.manifest
    }
}

impl Module for ManifestModule {
    fn id(&self) -> &ModuleId {
        &self.id
    }

    fn hook(&self, name: &str) -> Option<HookFn> {
        self.manifest.hook_commands(name)?;
        let manifest = self.manifest.clone();
        let dir = self.dir.clone();
        let hook = name.to_string();
        Some(Arc::new(
            move |host: &mut dyn Host, _command: &str| -> Result<(), HookError> {
                for spec in manifest.hook_commands(&hook).unwrap_or_default() {
                    debug!(command = %spec.name, hook = %hook, "Registering manifest command");
                    host.register_command(&spec.name, Arc::new(ExecCommand::new(spec.clone(), &dir)))?;
                }
                Ok(())
            },
        ))
    }

    fn hook_names(&self) -> Vec<String> {
        if self.manifest.hooks.is_empty() {
            vec![CONVENTIONAL_HOOK.to_string()]
        } else {
            self.manifest.hooks.keys().cloned().collect()
        }
    }
}

/// Runs the program declared by a manifest command.
#[derive(Debug, Clone)]
pub struct ExecCommand {
    spec: CommandSpec,
    dir: PathBuf,
}

impl ExecCommand {
    pub fn new(spec: CommandSpec, dir: &Path) -> Self {
        Self {
            spec,
            dir: dir.to_path_buf(),
        }
    }

    /// Program path, anchored at the manifest directory when relative.
    fn program(&self) -> PathBuf {
        let program = Path::new(self.spec.exec.first().map(String::as_str).unwrap_or_default());
        match program.components().next() {
            Some(Component::CurDir | Component::ParentDir) => self.dir.join(program),
            _ => program.to_path_buf(),
        }
    }
}

impl Command for ExecCommand {
    fn usage(&self) -> &str {
        &self.spec.usage
    }

    fn help(&self) -> Option<&str> {
        self.spec.help.as_deref()
    }

    fn run(&self, _host: &mut dyn Host, args: &[String]) -> Result<(), CommandError> {
        let program = self.program();
        let status = Process::new(&program)
            .args(self.spec.exec.get(1..).unwrap_or_default())
            .args(args)
            .current_dir(&self.dir)
            .status()
            .map_err(|e| CommandError::Spawn {
                program: program.display().to_string(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::ExitStatus {
                command: self.spec.name.clone(),
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
