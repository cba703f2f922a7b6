//! Load state for one engine run.

use std::collections::HashSet;

use autoload_protocols::ModuleId;

/// Which module identities were resolved and whose hooks already ran.
///
/// A hook runs at most once per identity; repeated attempts are no-ops.
#[derive(Debug, Default)]
pub struct LoadState {
    resolved: HashSet<ModuleId>,
    invoked: HashSet<ModuleId>,
}

impl LoadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the engine located `id`.
    pub fn record_resolved(&mut self, id: ModuleId) {
        self.resolved.insert(id);
    }

    /// Whether the engine itself located `id`.
    pub fn was_resolved(&self, id: &ModuleId) -> bool {
        self.resolved.contains(id)
    }

    /// Whether the hook of `id` has already run.
    pub fn has_invoked(&self, id: &ModuleId) -> bool {
        self.invoked.contains(id)
    }

    /// Claim the single hook invocation of `id`. Returns `false` if already claimed.
    pub fn mark_invoked(&mut self, id: ModuleId) -> bool {
        self.invoked.insert(id)
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn invoked_count(&self) -> usize {
        self.invoked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_invoked_once() {
        let mut state = LoadState::new();
        let id = ModuleId::linked("foo");

        assert!(!state.has_invoked(&id));
        assert!(state.mark_invoked(id.clone()));
        assert!(!state.mark_invoked(id.clone()));
        assert!(state.has_invoked(&id));
        assert_eq!(state.invoked_count(), 1);
    }

    #[test]
    fn test_resolved_is_independent_of_invoked() {
        let mut state = LoadState::new();
        let id = ModuleId::new("/proj/extensions/foo/extension.yaml");

        state.record_resolved(id.clone());
        assert!(state.was_resolved(&id));
        assert!(!state.has_invoked(&id));
        assert_eq!(state.resolved_count(), 1);
    }
}
