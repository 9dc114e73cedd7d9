use serde::{Deserialize, Serialize};

use super::defaults;

/// Correctness evaluation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Minimum string similarity between a predicted name and the ground truth. Default: 0.6.
    pub similarity_threshold: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}
