//! Rule-driven generation and validation of Arabic derived word forms.
//!
//! A word is produced by filling a scheme template with the letters of a
//! triliteral root, then running the rewrite groups selected by the root's
//! shape and the scheme name.
//!
//! # Architecture
//!
//! - [`definitions`] -- Line grammar of scheme and transformation files
//!   (parsing and serialization)
//! - [`registry`] -- [`TransformationRegistry`], the keyed rule groups
//! - [`engine`] -- [`EngineState`] and the generate / validate operations
//! - [`handle`] -- [`MorphologyHandle`], the administrative facade
//! - [`persist`] -- [`DefinitionSink`], where mutated definitions are sent
//! - [`stats`] -- Aggregate statistics over roots and derivatives
//! - [`config`] -- Engine configuration

pub mod config;
pub mod definitions;
pub mod engine;
pub mod handle;
pub mod persist;
pub mod registry;
pub mod stats;

pub use config::EngineConfig;
pub use engine::EngineState;
pub use handle::{LoadSummary, MorphologyHandle};
pub use persist::{DefinitionSink, NullSink};
pub use registry::TransformationRegistry;
pub use stats::{RootStat, Statistics};

use sarf_core::InvalidRoot;

/// Which definition set a persistence request concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Schemes,
    Transformations,
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionKind::Schemes => f.write_str("schemes"),
            DefinitionKind::Transformations => f.write_str("transformations"),
        }
    }
}

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum MorphologyError {
    /// The root is not exactly three letters.
    #[error(transparent)]
    InvalidRoot(#[from] InvalidRoot),

    /// The root is not in the root store.
    #[error("unknown root: {0}")]
    RootNotFound(String),

    /// The scheme is not in the pattern store.
    #[error("unknown scheme: {0}")]
    SchemeNotFound(String),

    /// The scheme or group cannot be written in the line format and read
    /// back unchanged. Nothing was modified.
    #[error("{kind} definition {definition:?} cannot be stored as a definition line")]
    InvalidDefinition {
        kind: DefinitionKind,
        definition: String,
    },

    /// The in-memory change was applied but could not be made durable.
    /// Memory and the definition source now disagree until the next
    /// successful write.
    #[error("failed to persist {target} (in-memory change kept): {source}")]
    Persistence {
        target: DefinitionKind,
        #[source]
        source: std::io::Error,
    },
}
