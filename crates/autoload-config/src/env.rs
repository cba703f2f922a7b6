//! Environment toggles.

/// When set, the autoload pass is skipped for the whole process.
pub const SKIP_ENV: &str = "AUTOLOAD_SKIP";

/// When set, logging defaults to debug verbosity.
pub const DEBUG_ENV: &str = "AUTOLOAD_DEBUG";

fn is_set(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|v| !v.is_empty())
}

pub fn autoload_disabled() -> bool {
    is_set(SKIP_ENV)
}

pub fn debug_enabled() -> bool {
    is_set(DEBUG_ENV)
}
