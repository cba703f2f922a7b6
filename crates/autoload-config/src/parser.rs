//! Autoload config parser.
//!
//! A config file holds a sequence of entries, each either a compact string
//! or an object:
//!
//! ```yaml
//! - left-pad                  # optional, conventional hook
//! - +./tools/deploy:register  # required, explicit hook
//! - module: lint-rules
//!   func: setup
//!   required: false
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{error, warn};

use autoload_protocols::AutoloadEntry;

use crate::error::ConfigError;
use crate::format::ConfigFormat;
use crate::locator::ConfigLocator;

/// Marker making a compact entry required.
const REQUIRED_MARKER: char = '+';

/// Turns config file contents into autoload entries.
pub struct EntryParser;

impl EntryParser {
    /// Locate and parse the config file of `dir`.
    ///
    /// Returns `None` when no config file exists. A file that cannot be read
    /// or decoded is logged and yields no entries.
    pub fn load(dir: &Path, prefix: Option<&str>) -> Option<Vec<AutoloadEntry>> {
        let located = ConfigLocator::locate(dir, prefix)?;
        let result = fs::read_to_string(&located.path)
            .map_err(ConfigError::from)
            .and_then(|content| Self::parse(&content, located.format, &located.path));

        match result {
            Ok(entries) => Some(entries),
            Err(e @ ConfigError::NotASequence(_)) => {
                error!("{}", e);
                Some(Vec::new())
            }
            Err(e) => {
                error!(
                    "Could not parse {} file {}: {}",
                    located.format,
                    located.path.display(),
                    e
                );
                Some(Vec::new())
            }
        }
    }

    /// Parse file contents declared at `path`.
    pub fn parse(
        content: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> Result<Vec<AutoloadEntry>, ConfigError> {
        let value = format.decode(content)?;
        let Value::Array(items) = value else {
            return Err(ConfigError::NotASequence(path.to_path_buf()));
        };

        let mut entries = Vec::with_capacity(items.len());
        for item in &items {
            match Self::normalize(item, path) {
                Some(entry) => entries.push(entry),
                None => warn!(
                    "Unexpected entry {} in file {}, ignoring",
                    item,
                    path.display()
                ),
            }
        }
        Ok(entries)
    }

    /// Normalize one element. Returns `None` for malformed elements.
    pub fn normalize(item: &Value, path: &Path) -> Option<AutoloadEntry> {
        match item {
            Value::String(s) => Self::parse_compact(s, path),
            Value::Object(map) => Self::parse_object(map, path),
            _ => None,
        }
    }

    /// `[+]module[:func]`
    fn parse_compact(raw: &str, path: &Path) -> Option<AutoloadEntry> {
        let (required, spec) = match raw.strip_prefix(REQUIRED_MARKER) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (module, func) = match spec.split_once(':') {
            Some((module, func)) => (module, Some(func).filter(|f| !f.is_empty())),
            None => (spec, None),
        };
        if module.is_empty() {
            return None;
        }

        Some(AutoloadEntry {
            base_path: path.to_path_buf(),
            module: module.to_string(),
            func: func.map(str::to_string),
            required,
            extra: BTreeMap::new(),
        })
    }

    /// Any object with a non-empty string `module` is accepted. `required`
    /// follows truthiness, a non-string `func` is ignored and unknown keys
    /// land in `extra`.
    fn parse_object(map: &Map<String, Value>, path: &Path) -> Option<AutoloadEntry> {
        let module = map.get("module").filter(|v| is_non_empty_str(v))?.as_str()?;

        let mut func = None;
        let mut required = false;
        let mut extra = BTreeMap::new();
        for (key, value) in map {
            match key.as_str() {
                // The declaring file is authoritative for basePath.
                "module" | "basePath" => {}
                "func" => {
                    func = value
                        .as_str()
                        .filter(|f| !f.is_empty())
                        .map(str::to_string)
                }
                "required" => required = is_truthy(value),
                _ => {
                    extra.insert(key.clone(), value.clone());
                }
            }
        }

        Some(AutoloadEntry {
            base_path: path.to_path_buf(),
            module: module.to_string(),
            func,
            required,
            extra,
        })
    }
}

fn is_non_empty_str(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
