//! Locally-bound identifier tracking for a single-file walk

use std::collections::HashSet;

/// Names bound by local declarations encountered so far in one file.
///
/// The set only grows: this is a single-pass simplification, not true
/// lexical scoping. A name used before its later declaration in the same
/// file is classified as a global reference; callers wanting full precision
/// would need a per-scope declaration pre-pass before classification.
#[derive(Debug, Default)]
pub struct ScopeSet {
    names: HashSet<String>,
}

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a locally declared name.
    pub fn declare(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }

    /// Whether a name is locally bound at this point of the walk.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_names_are_contained() {
        let mut scope = ScopeSet::new();
        assert!(!scope.contains("fetch"));
        scope.declare("fetch");
        assert!(scope.contains("fetch"));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn redeclaration_is_idempotent() {
        let mut scope = ScopeSet::new();
        scope.declare("x");
        scope.declare("x");
        assert_eq!(scope.len(), 1);
    }
}
