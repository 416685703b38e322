//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one AI decision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Search nodes visited.
    pub nodes: u64,

    /// Subtrees cut off by alpha-beta.
    pub cutoffs: u64,

    /// Branches whose action was rejected mid-search.
    pub failed_branches: u64,

    /// Determinized simulations run.
    pub simulations: u32,

    /// Total time spent deciding (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold in the statistics of an independent search.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
        self.failed_branches += other.failed_branches;
        self.simulations += other.simulations;
    }

    /// Nodes visited per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
