//! Configuration for the experiment loop.
//!
//! # Examples
//!
//! ```
//! use concord_core::config::{ExperimentConfig, GraphFailurePolicy, SelectionMode};
//!
//! let config = ExperimentConfig::default();
//! assert_eq!(config.iterations, 15);
//! assert_eq!(config.selection, SelectionMode::ActiveLearning);
//! assert_eq!(config.on_graph_error, GraphFailurePolicy::Abort);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// How the orchestrator picks the next case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Cases in load order.
    Sequential,
    /// Discordance-conditioned selection.
    ActiveLearning,
}

/// What to do when the graph builder returns something that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphFailurePolicy {
    /// Stop the run and propagate the parse error.
    Abort,
    /// Log, write no history row, and move on to the next case.
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Upper bound on iterations; also capped by the number of loaded cases. Default: 15.
    pub iterations: usize,
    /// Wall-clock target per evaluated iteration, in seconds. Default: 60.
    pub iteration_budget_secs: f64,
    /// Case selection mode. Default: active learning.
    pub selection: SelectionMode,
    /// Seed for the selector's random fallback. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Graph parse failure policy. Default: abort.
    pub on_graph_error: GraphFailurePolicy,
}

impl ExperimentConfig {
    /// Iteration budget as a `Duration`. Negative or non-finite budgets collapse to zero.
    pub fn iteration_budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.iteration_budget_secs).unwrap_or(Duration::ZERO)
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::DEFAULT_ITERATIONS,
            iteration_budget_secs: defaults::DEFAULT_ITERATION_BUDGET_SECS,
            selection: SelectionMode::ActiveLearning,
            seed: None,
            on_graph_error: GraphFailurePolicy::Abort,
        }
    }
}
