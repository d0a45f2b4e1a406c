//! Storage structures for the sarf morphology engine.
//!
//! Both structures are hand-rolled so that their internal layout stays
//! inspectable (tree shape, bucket chains) for debugging and visualization.
//!
//! # Architecture
//!
//! - [`root_tree`] -- [`RootStore`], an AVL tree of roots, each owning its
//!   derivative list
//! - [`pattern_table`] -- [`PatternStore`], a chained hash map from scheme
//!   name to template with load-factor driven growth

pub mod pattern_table;
pub mod root_tree;

pub use pattern_table::{PatternStore, TableMetrics};
pub use root_tree::{RootEntry, RootStore, TreeSnapshot};
