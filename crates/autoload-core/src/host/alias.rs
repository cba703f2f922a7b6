//! Alias and abbreviation resolution for host commands.

use std::any::Any;
use std::collections::HashMap;

use autoload_protocols::AliasResolver;

/// Resolves exact names, explicit aliases and unique prefixes.
///
/// The known names are fixed when the resolver is built; commands added
/// later are not abbreviated.
#[derive(Debug, Clone, Default)]
pub struct AbbrevResolver {
    names: Vec<String>,
    aliases: HashMap<String, String>,
}

impl AbbrevResolver {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            aliases: HashMap::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), target.into());
        self
    }
}

impl AliasResolver for AbbrevResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        if self.names.iter().any(|n| n == name) {
            return Some(name.to_string());
        }
        if let Some(target) = self.aliases.get(name) {
            return Some(target.clone());
        }

        let mut matches = self.names.iter().filter(|n| n.starts_with(name));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.clone()),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
