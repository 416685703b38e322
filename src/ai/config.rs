//! AI configuration parameters.

use serde::{Deserialize, Serialize};

/// AI configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Search depth in plies for Hard and Expert (default: 3).
    pub depth: u32,

    /// Actions expanded per search node, best first by the ordering
    /// heuristic (default: 6).
    pub branch_limit: usize,

    /// Determinized simulations Expert runs per decision (default: 30).
    pub simulations: usize,

    /// Opening hands scoring at least this are kept.
    pub mulligan_threshold: f64,

    /// Probability Easy keeps its opening hand.
    pub easy_keep_bias: f64,

    /// Probability Easy plays rather than passes when it can.
    pub easy_play_bias: f64,

    /// Random seed. Same seed and same input produce the same choice.
    pub seed: u64,

    /// Run Expert's simulations on the rayon thread pool.
    pub parallel: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            branch_limit: 6,
            simulations: 30,
            mulligan_threshold: 0.55,
            easy_keep_bias: 0.8,
            easy_play_bias: 0.75,
            seed: 42,
            parallel: true,
        }
    }
}

impl AiConfig {
    /// Set the random seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the search depth (builder pattern).
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the per-node branch limit (builder pattern).
    #[must_use]
    pub fn with_branch_limit(mut self, limit: usize) -> Self {
        self.branch_limit = limit.max(1);
        self
    }

    /// Set Expert's simulation count (builder pattern).
    #[must_use]
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations.max(1);
        self
    }

    /// Choose sequential or parallel simulations (builder pattern).
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
