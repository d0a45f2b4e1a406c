// Root store: an AVL tree keyed by root text
//
// Each node owns the root's derivative list. Nodes own their children
// exclusively (no parent pointers), so the tree is a plain recursive
// `Option<Box<_>>` structure.

use std::cmp::Ordering;

use serde::Serialize;

use sarf_core::derivative::{Derivative, record_derivative};

// ---------------------------------------------------------------------------
// Entries and nodes
// ---------------------------------------------------------------------------

/// A stored root together with the words derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEntry {
    root: String,
    derivatives: Vec<Derivative>,
}

impl RootEntry {
    fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            derivatives: Vec::new(),
        }
    }

    /// The root text.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Derivatives in first-recorded order.
    pub fn derivatives(&self) -> &[Derivative] {
        &self.derivatives
    }

    /// Record one more occurrence of `word` for this root.
    pub fn record_derivative(&mut self, word: &str) {
        record_derivative(&mut self.derivatives, word);
    }
}

#[derive(Debug)]
struct RootNode {
    entry: RootEntry,
    height: i32,
    left: Option<Box<RootNode>>,
    right: Option<Box<RootNode>>,
}

impl RootNode {
    fn new(root: &str) -> Self {
        Self {
            entry: RootEntry::new(root),
            height: 1,
            left: None,
            right: None,
        }
    }

    fn key(&self) -> &str {
        &self.entry.root
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Left height minus right height.
    fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height(node: &Option<Box<RootNode>>) -> i32 {
    node.as_ref().map_or(0, |n| n.height)
}

// ---------------------------------------------------------------------------
// Rotations
// ---------------------------------------------------------------------------

/// Rotate a left-leaning subtree to the right.
fn rotate_right(mut y: Box<RootNode>) -> Box<RootNode> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Rotate a right-leaning subtree to the left.
fn rotate_left(mut x: Box<RootNode>) -> Box<RootNode> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Insert `key` below `slot` and return the rebalanced subtree root.
///
/// The rotation case is chosen by comparing the inserted key against the
/// child on the heavy side.
fn insert_at(slot: Option<Box<RootNode>>, key: &str, inserted: &mut bool) -> Box<RootNode> {
    let mut node = match slot {
        None => {
            *inserted = true;
            return Box::new(RootNode::new(key));
        }
        Some(node) => node,
    };

    match key.cmp(node.key()) {
        Ordering::Less => node.left = Some(insert_at(node.left.take(), key, inserted)),
        Ordering::Greater => node.right = Some(insert_at(node.right.take(), key, inserted)),
        Ordering::Equal => return node,
    }

    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        let goes_left = node.left.as_ref().is_some_and(|l| key < l.key());
        if !goes_left {
            // Left-right
            if let Some(left) = node.left.take() {
                node.left = Some(rotate_left(left));
            }
        }
        // Left-left (or the second half of left-right)
        return rotate_right(node);
    }

    if balance < -1 {
        let goes_right = node.right.as_ref().is_some_and(|r| key > r.key());
        if !goes_right {
            // Right-left
            if let Some(right) = node.right.take() {
                node.right = Some(rotate_right(right));
            }
        }
        // Right-right (or the second half of right-left)
        return rotate_left(node);
    }

    node
}

// ---------------------------------------------------------------------------
// RootStore
// ---------------------------------------------------------------------------

/// Balanced search tree of roots.
///
/// Lookups and insertions are O(log n); listing is O(n) and always yields
/// roots in ascending lexicographic order.
#[derive(Debug, Default)]
pub struct RootStore {
    top: Option<Box<RootNode>>,
    len: usize,
}

impl RootStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a root. Returns `false` (and changes nothing) if it is
    /// already present.
    pub fn insert(&mut self, root: &str) -> bool {
        let mut inserted = false;
        self.top = Some(insert_at(self.top.take(), root, &mut inserted));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Check whether a root is present.
    pub fn contains(&self, root: &str) -> bool {
        self.find(root).is_some()
    }

    /// Look up a root's entry.
    pub fn find(&self, root: &str) -> Option<&RootEntry> {
        let mut current = self.top.as_deref();
        while let Some(node) = current {
            current = match root.cmp(node.key()) {
                Ordering::Equal => return Some(&node.entry),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Look up a root's entry for mutation.
    pub fn find_mut(&mut self, root: &str) -> Option<&mut RootEntry> {
        let mut current = self.top.as_deref_mut();
        while let Some(node) = current {
            current = match root.cmp(node.key()) {
                Ordering::Equal => return Some(&mut node.entry),
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// Record a derivative for `root`. Returns `false` if the root is absent.
    pub fn record_derivative(&mut self, root: &str, word: &str) -> bool {
        match self.find_mut(root) {
            Some(entry) => {
                entry.record_derivative(word);
                true
            }
            None => false,
        }
    }

    /// All roots in ascending order.
    pub fn list(&self) -> Vec<&str> {
        self.iter().map(RootEntry::root).collect()
    }

    /// All entries in ascending order of root.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.top.as_deref());
        iter
    }

    /// Number of stored roots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree (0 when empty).
    pub fn height(&self) -> i32 {
        height(&self.top)
    }

    /// Owned view of the tree shape, for debugging and visualization.
    pub fn snapshot(&self) -> Option<TreeSnapshot> {
        self.top.as_deref().map(TreeSnapshot::of)
    }
}

/// In-order iterator over a [`RootStore`].
pub struct Iter<'a> {
    stack: Vec<&'a RootNode>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut node: Option<&'a RootNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a RootEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.entry)
    }
}

impl<'a> IntoIterator for &'a RootStore {
    type Item = &'a RootEntry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Owned copy of one tree node and its subtrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub root: String,
    pub height: i32,
    pub derivative_count: usize,
    pub left: Option<Box<TreeSnapshot>>,
    pub right: Option<Box<TreeSnapshot>>,
}

impl TreeSnapshot {
    fn of(node: &RootNode) -> Self {
        Self {
            root: node.entry.root.clone(),
            height: node.height,
            derivative_count: node.entry.derivatives.len(),
            left: node.left.as_deref().map(|n| Box::new(Self::of(n))),
            right: node.right.as_deref().map(|n| Box::new(Self::of(n))),
        }
    }

    /// Left subtree height minus right subtree height.
    pub fn balance_factor(&self) -> i32 {
        let h = |s: &Option<Box<TreeSnapshot>>| s.as_ref().map_or(0, |n| n.height);
        h(&self.left) - h(&self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Check the AVL invariants below `node` and return the real height.
    fn check_invariants(node: &Option<Box<TreeSnapshot>>) -> i32 {
        let Some(n) = node else {
            return 0;
        };
        let lh = check_invariants(&n.left);
        let rh = check_invariants(&n.right);
        assert_eq!(n.height, 1 + lh.max(rh), "stale height at {}", n.root);
        assert!(
            (lh - rh).abs() <= 1,
            "unbalanced at {}: {} vs {}",
            n.root,
            lh,
            rh
        );
        assert_eq!(n.balance_factor(), lh - rh);
        n.height
    }

    fn assert_avl(store: &RootStore) {
        let snap = store.snapshot().map(Box::new);
        let h = check_invariants(&snap);
        assert_eq!(h, store.height());
    }

    fn assert_strictly_ascending(store: &RootStore) {
        let list = store.list();
        assert_eq!(list.len(), store.len());
        for pair in list.windows(2) {
            assert!(pair[0] < pair[1], "{:?} not < {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn empty_store() {
        let store = RootStore::new();
        assert!(store.is_empty());
        assert_eq!(store.height(), 0);
        assert!(store.snapshot().is_none());
        assert!(store.list().is_empty());
        assert!(!store.contains("كتب"));
    }

    #[test]
    fn insert_and_find() {
        let mut store = RootStore::new();
        assert!(store.insert("كتب"));
        assert!(store.insert("درس"));
        assert!(store.contains("كتب"));
        assert!(store.contains("درس"));
        assert!(!store.contains("علم"));
        assert_eq!(store.find("كتب").map(RootEntry::root), Some("كتب"));
    }

    #[test]
    fn duplicate_insert_is_ignored() {
        let mut store = RootStore::new();
        assert!(store.insert("كتب"));
        store.record_derivative("كتب", "كاتب");
        assert!(!store.insert("كتب"));
        assert_eq!(store.len(), 1);
        // The existing entry is untouched.
        assert_eq!(store.find("كتب").map(|e| e.derivatives().len()), Some(1));
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut store = RootStore::new();
        for i in 0..100 {
            store.insert(&format!("r{i:03}"));
            assert_avl(&store);
        }
        assert_eq!(store.len(), 100);
        // A balanced tree of 100 nodes is at most 1.44 * log2(101) high.
        assert!(store.height() <= 9);
        assert_strictly_ascending(&store);
    }

    #[test]
    fn descending_inserts_stay_balanced() {
        let mut store = RootStore::new();
        for i in (0..100).rev() {
            store.insert(&format!("r{i:03}"));
            assert_avl(&store);
        }
        assert_strictly_ascending(&store);
    }

    #[test]
    fn double_rotation_cases() {
        // Left-right: c, a, b
        let mut store = RootStore::new();
        for k in ["c", "a", "b"] {
            store.insert(k);
        }
        let snap = store.snapshot().unwrap();
        assert_eq!(snap.root, "b");
        assert_eq!(snap.height, 2);

        // Right-left: a, c, b
        let mut store = RootStore::new();
        for k in ["a", "c", "b"] {
            store.insert(k);
        }
        let snap = store.snapshot().unwrap();
        assert_eq!(snap.root, "b");
        assert_eq!(snap.left.as_ref().unwrap().root, "a");
        assert_eq!(snap.right.as_ref().unwrap().root, "c");
    }

    #[test]
    fn pseudo_random_inserts_keep_invariants() {
        let mut store = RootStore::new();
        let mut state: u32 = 12345;
        let mut distinct = std::collections::BTreeSet::new();
        for _ in 0..500 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let key = format!("k{}", (state >> 16) % 300);
            let inserted = store.insert(&key);
            assert_eq!(inserted, distinct.insert(key));
            assert_avl(&store);
        }
        assert_eq!(store.len(), distinct.len());
        let expected: Vec<&str> = distinct.iter().map(String::as_str).collect();
        assert_eq!(store.list(), expected);
    }

    #[test]
    fn arabic_roots_listed_in_order() {
        let mut store = RootStore::new();
        for r in ["كتب", "درس", "علم", "قول", "بيع", "وعد", "رمي"] {
            store.insert(r);
        }
        assert_strictly_ascending(&store);
        assert_eq!(store.list().first(), Some(&"بيع"));
        assert_eq!(store.list().last(), Some(&"وعد"));
    }

    #[test]
    fn record_derivative_tracks_frequency() {
        let mut store = RootStore::new();
        store.insert("كتب");
        assert!(store.record_derivative("كتب", "كاتب"));
        assert!(store.record_derivative("كتب", "كاتب"));
        assert!(store.record_derivative("كتب", "مكتوب"));
        let entry = store.find("كتب").unwrap();
        let formatted: Vec<String> = entry.derivatives().iter().map(|d| d.to_string()).collect();
        assert_eq!(formatted, vec!["كاتب (f=2)", "مكتوب (f=1)"]);
    }

    #[test]
    fn record_derivative_for_missing_root() {
        let mut store = RootStore::new();
        assert!(!store.record_derivative("كتب", "كاتب"));
    }

    #[test]
    fn derivatives_survive_rotations() {
        let mut store = RootStore::new();
        store.insert("a");
        store.record_derivative("a", "w");
        for k in ["b", "c", "d", "e", "f"] {
            store.insert(k);
        }
        let entry = store.find("a").unwrap();
        assert_eq!(entry.derivatives()[0].word, "w");
        let snap = store.snapshot().unwrap();
        assert_eq!(snap.root, "d");
        assert_eq!(snap.left.as_ref().unwrap().root, "b");
    }

    #[test]
    fn iter_matches_list() {
        let mut store = RootStore::new();
        for k in ["m", "c", "x", "a"] {
            store.insert(k);
        }
        let via_iter: Vec<&str> = (&store).into_iter().map(|e| e.root()).collect();
        assert_eq!(via_iter, store.list());
        assert_eq!(via_iter, vec!["a", "c", "m", "x"]);
    }
}
