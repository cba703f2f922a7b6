//! Failure policy for autoload entries.

use tracing::{debug, error, warn};

use autoload_protocols::{AutoloadEntry, AutoloadError, Host, Scope, INSTALL_COMMAND};

/// How an entry failure is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Log a warning and move on.
    ContinueWarn,
    /// Log at debug level and move on.
    ContinueSuppress,
    /// Log twice at error level and end the process.
    Abort,
}

/// Detects the first install of a project, before any dependency exists.
pub struct BootstrapProbe;

impl BootstrapProbe {
    /// A bootstrap pass is a bare `install` in a project scope whose
    /// dependency directory has not been created yet.
    pub fn detect(host: &dyn Host, command: &str, scope: &Scope) -> bool {
        if !scope.is_project() {
            return false;
        }
        let is_install = host.deref(command).as_deref().unwrap_or(command) == INSTALL_COMMAND;
        is_install
            && host.invocation().args.is_empty()
            && !host.settings().project_dependency_dir().exists()
    }
}

/// Maps entry failures to a [`Disposition`] and reports them.
pub struct FailureClassifier;

impl FailureClassifier {
    pub fn classify(entry: &AutoloadEntry, scope: &Scope, bootstrap: bool) -> Disposition {
        if bootstrap && scope.is_project() {
            Disposition::ContinueSuppress
        } else if entry.required {
            Disposition::Abort
        } else {
            Disposition::ContinueWarn
        }
    }

    /// Log `err` the way `disposition` demands.
    ///
    /// Returns the error that ends the process for [`Disposition::Abort`].
    pub fn report(
        err: &AutoloadError,
        entry: &AutoloadEntry,
        disposition: Disposition,
    ) -> Option<AutoloadError> {
        let config = entry.base_path.display();
        let kind = err.kind().map(|k| k.to_string()).unwrap_or_default();
        let detail = err.detail().unwrap_or_default();
        match disposition {
            Disposition::ContinueWarn => {
                warn!(config = %config, kind = %kind, detail, "{}", err);
                None
            }
            Disposition::ContinueSuppress => {
                debug!(
                    config = %config,
                    kind = %kind,
                    detail,
                    "{} (first install, ignored)",
                    err
                );
                None
            }
            Disposition::Abort => {
                let fatal = AutoloadError::Required {
                    module: entry.module.clone(),
                    config: entry.base_path.clone(),
                };
                error!(config = %config, kind = %kind, detail, "{}", err);
                error!(config = %config, "{}", fatal);
                Some(fatal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CommandHost;
    use autoload_protocols::{HostSettings, Invocation};
    use std::fs;
    use tempfile::TempDir;

    fn entry(required: bool) -> AutoloadEntry {
        let entry = AutoloadEntry::new("/proj/autoload.yaml", "foo");
        if required { entry.required() } else { entry }
    }

    fn host_with(dir: &std::path::Path, invocation: Invocation) -> CommandHost {
        let mut host = CommandHost::new(HostSettings::new(dir, dir.join("global")));
        host.set_invocation(invocation);
        host
    }

    #[test]
    fn test_classify_optional() {
        let scope = Scope::project("/proj");
        assert_eq!(
            FailureClassifier::classify(&entry(false), &scope, false),
            Disposition::ContinueWarn
        );
    }

    #[test]
    fn test_classify_required() {
        let scope = Scope::project("/proj");
        assert_eq!(
            FailureClassifier::classify(&entry(true), &scope, false),
            Disposition::Abort
        );
        let scope = Scope::global("/usr/local/etc");
        assert_eq!(
            FailureClassifier::classify(&entry(true), &scope, false),
            Disposition::Abort
        );
    }

    #[test]
    fn test_classify_bootstrap_suppresses_project_failures() {
        let scope = Scope::project("/proj");
        assert_eq!(
            FailureClassifier::classify(&entry(false), &scope, true),
            Disposition::ContinueSuppress
        );
        assert_eq!(
            FailureClassifier::classify(&entry(true), &scope, true),
            Disposition::ContinueSuppress
        );
    }

    #[test]
    fn test_classify_bootstrap_does_not_cover_global_scope() {
        let scope = Scope::global("/usr/local/etc");
        assert_eq!(
            FailureClassifier::classify(&entry(true), &scope, true),
            Disposition::Abort
        );
    }

    #[test]
    fn test_report_abort_returns_required_error() {
        let err = AutoloadError::Resolve {
            module: "foo".to_string(),
            reason: "missing".to_string(),
        };
        let fatal = FailureClassifier::report(&err, &entry(true), Disposition::Abort).unwrap();
        assert!(matches!(fatal, AutoloadError::Required { ref module, .. } if module == "foo"));
        assert!(FailureClassifier::report(&err, &entry(false), Disposition::ContinueWarn).is_none());
    }

    #[test]
    fn test_bootstrap_detected_on_first_install() {
        let dir = TempDir::new().unwrap();
        let host = host_with(dir.path(), Invocation::new("install", Vec::new()));
        let scope = Scope::project(dir.path());
        assert!(BootstrapProbe::detect(&host, "install", &scope));
    }

    #[test]
    fn test_bootstrap_accepts_install_alias() {
        let dir = TempDir::new().unwrap();
        let host = host_with(dir.path(), Invocation::new("install", Vec::new()));
        let scope = Scope::project(dir.path());
        assert!(BootstrapProbe::detect(&host, "i", &scope));
    }

    #[test]
    fn test_bootstrap_requires_missing_dependency_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("extensions")).unwrap();
        let host = host_with(dir.path(), Invocation::new("install", Vec::new()));
        let scope = Scope::project(dir.path());
        assert!(!BootstrapProbe::detect(&host, "install", &scope));
    }

    #[test]
    fn test_bootstrap_requires_no_arguments() {
        let dir = TempDir::new().unwrap();
        let host = host_with(
            dir.path(),
            Invocation::new("install", vec!["./some-ext".to_string()]),
        );
        let scope = Scope::project(dir.path());
        assert!(!BootstrapProbe::detect(&host, "install", &scope));
    }

    #[test]
    fn test_bootstrap_requires_install_and_project_scope() {
        let dir = TempDir::new().unwrap();
        let host = host_with(dir.path(), Invocation::new("commands", Vec::new()));
        assert!(!BootstrapProbe::detect(&host, "commands", &Scope::project(dir.path())));

        let host = host_with(dir.path(), Invocation::new("install", Vec::new()));
        assert!(!BootstrapProbe::detect(&host, "install", &Scope::global(dir.path())));
    }
}
