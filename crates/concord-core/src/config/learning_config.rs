use serde::{Deserialize, Serialize};

use super::defaults;

/// Active learning parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Discordance at or above which a past case counts as "hard". Default: 0.3.
    pub high_discordance_threshold: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            high_discordance_threshold: defaults::DEFAULT_HIGH_DISCORDANCE_THRESHOLD,
        }
    }
}
