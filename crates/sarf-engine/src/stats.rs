// Aggregate statistics over the engine state

use serde::Serialize;

use crate::engine::EngineState;

/// Derivative count for one root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootStat {
    pub root: String,
    pub derivatives: usize,
}

/// Totals over every stored root, plus a per-root breakdown in root order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_roots: usize,
    pub total_patterns: usize,
    pub total_derivatives: usize,
    /// Average number of distinct derivatives per root; 0 with no roots.
    pub density: f64,
    pub roots: Vec<RootStat>,
}

/// Compute statistics for `state`.
pub fn compute(state: &EngineState) -> Statistics {
    let roots: Vec<RootStat> = state
        .roots
        .iter()
        .map(|entry| RootStat {
            root: entry.root().to_string(),
            derivatives: entry.derivatives().len(),
        })
        .collect();
    let total_roots = roots.len();
    let total_derivatives: usize = roots.iter().map(|r| r.derivatives).sum();
    let density = if total_roots == 0 {
        0.0
    } else {
        total_derivatives as f64 / total_roots as f64
    };
    Statistics {
        total_roots,
        total_patterns: state.patterns.len(),
        total_derivatives,
        density,
        roots,
    }
}
