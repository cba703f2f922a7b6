//! Module reference resolution.
//!
//! A reference is resolved as if requested from the directory of the config
//! file that declared it:
//!
//! - `./x`, `../x` and absolute paths are probed on disk directly.
//! - Bare names are looked up in the linked catalog, then in the dependency
//!   directory of each ancestor, nearest first.
//!
//! Each candidate path is tried as a file, then with a manifest suffix
//! appended, then as a directory holding `extension.<suffix>`.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use autoload_config::FORMATS;
use autoload_protocols::{AutoloadError, ModuleId};

use super::catalog::ModuleCatalog;
use super::manifest::MANIFEST_BASENAME;

/// Where a resolved module comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSource {
    /// Registered in the linked catalog under this name.
    Linked(String),
    /// A manifest file on disk.
    File(PathBuf),
}

/// A module reference resolved to a canonical identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub id: ModuleId,
    pub source: ModuleSource,
}

/// Resolves module references.
pub struct ModuleResolver {
    catalog: Arc<ModuleCatalog>,
    dependency_dir: String,
}

impl ModuleResolver {
    pub fn new(catalog: Arc<ModuleCatalog>, dependency_dir: impl Into<String>) -> Self {
        Self {
            catalog,
            dependency_dir: dependency_dir.into(),
        }
    }

    /// Resolve `reference` from `base_dir`.
    pub fn resolve(&self, reference: &str, base_dir: &Path) -> Result<ResolvedModule, AutoloadError> {
        if is_path_reference(reference) {
            let candidate = base_dir.join(reference);
            return match probe(&candidate) {
                Some(path) => file_module(path, reference),
                None => Err(not_found(
                    reference,
                    format!("nothing at {}", candidate.display()),
                )),
            };
        }

        if self.catalog.contains(reference) {
            debug!(module = reference, "Resolved linked module");
            return Ok(ResolvedModule {
                id: ModuleId::linked(reference),
                source: ModuleSource::Linked(reference.to_string()),
            });
        }

        for ancestor in base_dir.ancestors() {
            let candidate = ancestor.join(&self.dependency_dir).join(reference);
            if let Some(path) = probe(&candidate) {
                return file_module(path, reference);
            }
        }

        Err(not_found(
            reference,
            format!(
                "not a linked module and no {} directory above {} provides it",
                self.dependency_dir,
                base_dir.display()
            ),
        ))
    }
}

fn is_path_reference(reference: &str) -> bool {
    let path = Path::new(reference);
    path.is_absolute()
        || matches!(
            path.components().next(),
            Some(Component::CurDir | Component::ParentDir)
        )
}

/// Find the manifest file a candidate path denotes.
fn probe(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }
    for format in FORMATS {
        let mut with_suffix = OsString::from(candidate.as_os_str());
        with_suffix.push(".");
        with_suffix.push(format.suffix());
        let with_suffix = PathBuf::from(with_suffix);
        if with_suffix.is_file() {
            return Some(with_suffix);
        }
    }
    if candidate.is_dir() {
        for format in FORMATS {
            let index = candidate.join(format!("{}.{}", MANIFEST_BASENAME, format.suffix()));
            if index.is_file() {
                return Some(index);
            }
        }
    }
    None
}

fn file_module(path: PathBuf, reference: &str) -> Result<ResolvedModule, AutoloadError> {
    let canonical = fs::canonicalize(&path).map_err(|e| not_found(reference, e.to_string()))?;
    debug!(module = reference, path = %canonical.display(), "Resolved module file");
    Ok(ResolvedModule {
        id: ModuleId::new(canonical.to_string_lossy()),
        source: ModuleSource::File(canonical),
    })
}

fn not_found(reference: &str, reason: String) -> AutoloadError {
    AutoloadError::Resolve {
        module: reference.to_string(),
        reason,
    }
}
