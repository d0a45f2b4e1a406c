// MorphologyHandle: administrative facade over one engine state.
//
// Owns the root tree, the pattern table and the transformation registry,
// plus the sink that receives serialized definitions after every scheme or
// group mutation. Ingestion takes already-decoded lines; the handle never
// opens files.
//
// Design notes:
// - Mutations apply in memory first and are then pushed to the sink. A sink
//   failure is logged and returned as `MorphologyError::Persistence`, but the
//   in-memory change stays.
// - Schemes and groups that the definition line format cannot carry are
//   rejected with `MorphologyError::InvalidDefinition` before anything
//   changes.
// - Generation lookups are exact-key; administrative group lookups ignore
//   ASCII case.

use sarf_core::{RootType, TransformationGroup, ValidationResult, classify};
use sarf_store::{RootEntry, TableMetrics, TreeSnapshot};

use crate::config::EngineConfig;
use crate::definitions::{
    DefinitionLine, format_header, group_is_representable, parse_root_line, parse_scheme_line,
    parse_transformations, scheme_is_representable, serialize_schemes, serialize_transformations,
};
use crate::engine::{self, EngineState};
use crate::persist::{DefinitionSink, NullSink};
use crate::stats::{self, Statistics};
use crate::{DefinitionKind, MorphologyError};

/// Outcome of ingesting one definition source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Definitions inserted or updated.
    pub applied: usize,
    /// Non-blank, non-comment lines that were rejected.
    pub skipped: usize,
}

/// Top-level handle owning the engine state and its persistence sink.
pub struct MorphologyHandle {
    state: EngineState,
    sink: Box<dyn DefinitionSink>,
}

impl std::fmt::Debug for MorphologyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphologyHandle")
            .field("roots", &self.state.roots.len())
            .field("schemes", &self.state.patterns.len())
            .field("groups", &self.state.transformations.len())
            .finish_non_exhaustive()
    }
}

impl Default for MorphologyHandle {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl MorphologyHandle {
    /// Create an empty handle that sends mutated definitions to `sink`.
    pub fn new(config: &EngineConfig, sink: Box<dyn DefinitionSink>) -> Self {
        Self {
            state: EngineState::with_pattern_capacity(config.pattern_capacity),
            sink,
        }
    }

    /// Create an empty handle with default config whose mutations are not
    /// persisted anywhere.
    pub fn in_memory() -> Self {
        Self::new(&EngineConfig::default(), Box::new(NullSink))
    }

    /// Read-only access to the underlying stores.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Insert roots from decoded lines.
    ///
    /// Lines are trimmed; blank and `#` lines are ignored. Lines that are not
    /// exactly three letters are skipped. Roots already present count as
    /// neither applied nor skipped.
    pub fn load_roots<I, S>(&mut self, lines: I) -> LoadSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = LoadSummary::default();
        for (index, raw) in lines.into_iter().enumerate() {
            let DefinitionLine::Entry(root) = parse_root_line(raw.as_ref()) else {
                continue;
            };
            if let Err(e) = classify(root) {
                tracing::warn!(line = index + 1, error = %e, "skipping root");
                summary.skipped += 1;
                continue;
            }
            if self.state.roots.insert(root) {
                summary.applied += 1;
            }
        }
        tracing::info!(
            loaded = summary.applied,
            skipped = summary.skipped,
            total = self.state.roots.len(),
            "roots loaded"
        );
        summary
    }

    /// Upsert schemes from decoded `<name>=<template>` lines.
    pub fn load_schemes<I, S>(&mut self, lines: I) -> LoadSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = LoadSummary::default();
        for (index, raw) in lines.into_iter().enumerate() {
            match parse_scheme_line(raw.as_ref()) {
                DefinitionLine::Ignored => {}
                DefinitionLine::Entry((name, template)) => {
                    self.state.patterns.put(name, template);
                    summary.applied += 1;
                }
                DefinitionLine::Malformed => {
                    tracing::warn!(line = index + 1, "skipping malformed scheme line");
                    summary.skipped += 1;
                }
            }
        }
        tracing::info!(
            loaded = summary.applied,
            skipped = summary.skipped,
            total = self.state.patterns.len(),
            "schemes loaded"
        );
        summary
    }

    /// Replace the whole transformation registry with the groups parsed from
    /// `lines`. Returns the number of groups.
    pub fn load_transformations<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = parse_transformations(lines);
        let count = groups.len();
        self.state.transformations.replace_all(groups);
        tracing::info!(groups = count, "transformations loaded");
        count
    }

    // =========================================================================
    // Roots
    // =========================================================================

    /// Add a root after checking it has three letters. Returns whether it was
    /// new. Roots are not persisted.
    pub fn add_root(&mut self, root: &str) -> Result<bool, MorphologyError> {
        classify(root)?;
        Ok(self.state.roots.insert(root))
    }

    pub fn classify(&self, root: &str) -> Result<RootType, MorphologyError> {
        Ok(classify(root)?)
    }

    /// All roots, ascending.
    pub fn roots(&self) -> Vec<&str> {
        self.state.roots.list()
    }

    /// All root entries with their derivatives, ascending by root.
    pub fn entries(&self) -> impl Iterator<Item = &RootEntry> {
        self.state.roots.iter()
    }

    /// Derivatives of `root` formatted as `<word> (f=<frequency>)`, in the
    /// order they were first recorded. Empty for an unknown root.
    pub fn derivatives(&self, root: &str) -> Vec<String> {
        self.state
            .roots
            .find(root)
            .map(|entry| entry.derivatives().iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Generate `root` under `scheme`, recording the result.
    pub fn generate(&mut self, root: &str, scheme: &str) -> Result<String, MorphologyError> {
        engine::generate(&mut self.state, root, scheme)
    }

    /// Generate `root` under every scheme, in table order.
    pub fn generate_all(&mut self, root: &str) -> Result<Vec<String>, MorphologyError> {
        engine::generate_all(&mut self.state, root)
    }

    /// Find the first scheme producing `word` from `root`.
    pub fn validate(&mut self, root: &str, word: &str) -> Result<ValidationResult, MorphologyError> {
        engine::validate(&mut self.state, root, word)
    }

    // =========================================================================
    // Schemes
    // =========================================================================

    /// Scheme names, sorted.
    pub fn schemes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.state.patterns.iter().map(|(name, _)| name).collect();
        names.sort_unstable();
        names
    }

    /// Every `(name, template)` pair in table order.
    pub fn schemes_with_templates(&self) -> Vec<(&str, &str)> {
        self.state.patterns.iter().collect()
    }

    pub fn scheme_template(&self, name: &str) -> Option<&str> {
        self.state.patterns.get(name)
    }

    /// Insert or replace a scheme, then persist all schemes. A name or
    /// template that the scheme line format cannot carry is rejected with
    /// `InvalidDefinition` before anything changes.
    pub fn add_scheme(&mut self, name: &str, template: &str) -> Result<(), MorphologyError> {
        check_scheme(name, template)?;
        self.state.patterns.put(name, template);
        tracing::info!(name, template, "scheme added");
        self.persist_schemes()
    }

    /// Replace an existing scheme's template, then persist all schemes.
    pub fn update_scheme(&mut self, name: &str, template: &str) -> Result<(), MorphologyError> {
        check_scheme(name, template)?;
        if !self.state.patterns.contains_key(name) {
            return Err(MorphologyError::SchemeNotFound(name.to_string()));
        }
        self.state.patterns.put(name, template);
        tracing::info!(name, template, "scheme updated");
        self.persist_schemes()
    }

    /// Remove an existing scheme, then persist all schemes.
    pub fn delete_scheme(&mut self, name: &str) -> Result<(), MorphologyError> {
        if self.state.patterns.remove(name).is_none() {
            return Err(MorphologyError::SchemeNotFound(name.to_string()));
        }
        tracing::info!(name, "scheme deleted");
        self.persist_schemes()
    }

    // =========================================================================
    // Transformation groups
    // =========================================================================

    /// All groups in definition order.
    pub fn transformation_groups(&self) -> &[TransformationGroup] {
        self.state.transformations.groups()
    }

    /// Look up a group, ignoring ASCII case in the key.
    pub fn transformation_group(&self, key: &str) -> Option<&TransformationGroup> {
        self.state.transformations.find(key)
    }

    /// Insert or replace a group, then persist all groups. Fails with
    /// `InvalidDefinition`, leaving the registry untouched, when the group
    /// would not read back unchanged from its definition line.
    pub fn save_transformation_group(
        &mut self,
        mut group: TransformationGroup,
    ) -> Result<(), MorphologyError> {
        group.normalize_order();
        if !group_is_representable(&group) {
            return Err(MorphologyError::InvalidDefinition {
                kind: DefinitionKind::Transformations,
                definition: format_header(&group),
            });
        }
        tracing::info!(key = %group.key, rules = group.rules.len(), "transformation group saved");
        self.state.transformations.upsert(group);
        self.persist_transformations()
    }

    /// Remove a group. Returns `Ok(false)` when no group matched, in which
    /// case nothing is persisted.
    pub fn delete_transformation_group(&mut self, key: &str) -> Result<bool, MorphologyError> {
        if !self.state.transformations.remove(key) {
            return Ok(false);
        }
        tracing::info!(key, "transformation group deleted");
        self.persist_transformations()?;
        Ok(true)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn statistics(&self) -> Statistics {
        stats::compute(&self.state)
    }

    pub fn tree_snapshot(&self) -> Option<TreeSnapshot> {
        self.state.roots.snapshot()
    }

    pub fn tree_height(&self) -> i32 {
        self.state.roots.height()
    }

    /// Every bucket of the pattern table, each chain from head to tail.
    pub fn bucket_layout(&self) -> Vec<Vec<(&str, &str)>> {
        (0..self.state.patterns.capacity())
            .map(|i| self.state.patterns.chain(i))
            .collect()
    }

    pub fn table_metrics(&self) -> TableMetrics {
        self.state.patterns.metrics()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist_schemes(&mut self) -> Result<(), MorphologyError> {
        let lines = serialize_schemes(&self.state.patterns);
        let result = self.sink.store_schemes(&lines);
        persisted(DefinitionKind::Schemes, result)
    }

    fn persist_transformations(&mut self) -> Result<(), MorphologyError> {
        let lines = serialize_transformations(self.state.transformations.groups());
        let result = self.sink.store_transformations(&lines);
        persisted(DefinitionKind::Transformations, result)
    }
}

fn check_scheme(name: &str, template: &str) -> Result<(), MorphologyError> {
    if scheme_is_representable(name, template) {
        Ok(())
    } else {
        Err(MorphologyError::InvalidDefinition {
            kind: DefinitionKind::Schemes,
            definition: format!("{name}={template}"),
        })
    }
}

fn persisted(target: DefinitionKind, result: std::io::Result<()>) -> Result<(), MorphologyError> {
    result.map_err(|source| {
        tracing::warn!(%target, error = %source, "persistence failed; in-memory change kept");
        MorphologyError::Persistence { target, source }
    })
}
