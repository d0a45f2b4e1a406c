// Transformation registry
//
// Groups are kept in definition order (that order is what gets persisted)
// together with a key -> position index used by the generation engine.
// The index is derived data and is rebuilt after every structural change.

use hashbrown::HashMap;

use sarf_core::TransformationGroup;

/// Ordered collection of rule groups with keyed lookup.
#[derive(Debug, Default)]
pub struct TransformationRegistry {
    groups: Vec<TransformationGroup>,
    index: HashMap<String, usize>,
}

impl TransformationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from groups in definition order.
    pub fn from_groups(groups: Vec<TransformationGroup>) -> Self {
        let mut registry = Self {
            groups,
            index: HashMap::new(),
        };
        registry.rebuild_index();
        registry
    }

    /// Replace every group, as when regenerating from the definition source.
    pub fn replace_all(&mut self, groups: Vec<TransformationGroup>) {
        self.groups = groups;
        self.rebuild_index();
    }

    /// Recompute the key index from the group list.
    ///
    /// When a key occurs more than once the later group wins.
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, group) in self.groups.iter().enumerate() {
            self.index.insert(group.key.clone(), position);
        }
    }

    /// Exact-key lookup used during generation.
    pub fn get(&self, key: &str) -> Option<&TransformationGroup> {
        self.index.get(key).map(|&i| &self.groups[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Apply the group stored under `key` to `word`. A missing group leaves
    /// the word unchanged.
    pub fn apply(&self, key: &str, word: &str) -> String {
        match self.get(key) {
            Some(group) => {
                tracing::trace!(key, "applying transformation group");
                group.apply(word)
            }
            None => word.to_string(),
        }
    }

    /// Administrative lookup, ignoring ASCII case in the key.
    pub fn find(&self, key: &str) -> Option<&TransformationGroup> {
        self.groups.iter().find(|g| g.key.eq_ignore_ascii_case(key))
    }

    /// Insert or replace a group.
    ///
    /// Any group whose key matches ignoring ASCII case is removed, the new
    /// group's rules are put in order and renumbered, and the group is
    /// appended at the end.
    pub fn upsert(&mut self, mut group: TransformationGroup) {
        self.groups.retain(|g| !g.key.eq_ignore_ascii_case(&group.key));
        group.normalize_order();
        self.groups.push(group);
        self.rebuild_index();
    }

    /// Remove every group matching `key` ignoring ASCII case. Returns
    /// whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| !g.key.eq_ignore_ascii_case(key));
        let removed = self.groups.len() != before;
        if removed {
            self.rebuild_index();
        }
        removed
    }

    /// Groups in definition order.
    pub fn groups(&self) -> &[TransformationGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
