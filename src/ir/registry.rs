//! Append-only class registry.

use std::collections::HashMap;

use super::ClassIndex;

/// Maps class labels to stable indices in first-seen order.
///
/// Labels are only ever appended; once a label has an index it keeps it for
/// the rest of the run. The registry is owned by the encoder and passed
/// explicitly, never shared through global state.
#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    names: Vec<String>,
    lookup: HashMap<String, ClassIndex>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `label`, appending it if it has not been seen.
    pub fn resolve(&mut self, label: &str) -> ClassIndex {
        if let Some(&index) = self.lookup.get(label) {
            return index;
        }

        let index = ClassIndex::new(self.names.len());
        self.names.push(label.to_string());
        self.lookup.insert(label.to_string(), index);
        index
    }

    pub fn get(&self, label: &str) -> Option<ClassIndex> {
        self.lookup.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Class names ordered by index.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_indices_in_first_seen_order() {
        let mut registry = ClassRegistry::new();
        assert_eq!(registry.resolve("cat"), ClassIndex::new(0));
        assert_eq!(registry.resolve("dog"), ClassIndex::new(1));
        assert_eq!(registry.resolve("cat"), ClassIndex::new(0));
        assert_eq!(registry.resolve("bird"), ClassIndex::new(2));

        assert_eq!(registry.names(), ["cat", "dog", "bird"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn get_does_not_insert() {
        let mut registry = ClassRegistry::new();
        assert!(registry.get("cat").is_none());
        assert!(registry.is_empty());

        registry.resolve("cat");
        assert_eq!(registry.get("cat"), Some(ClassIndex::new(0)));
    }

    #[test]
    fn labels_are_case_sensitive() {
        let mut registry = ClassRegistry::new();
        let lower = registry.resolve("cat");
        let upper = registry.resolve("Cat");
        assert_ne!(lower, upper);
    }
}
