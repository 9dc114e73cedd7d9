//! # concord-learning
//!
//! Case selection for the experiment loop.
//! Active learning steers toward notes that resemble the cases the agents
//! disagreed on; sequential selection replays load order.

pub mod active_learning;

pub use active_learning::{
    ActiveLearningSelector, IDifficultyStrategy, NoteLengthStrategy, SequentialSelector,
};

use concord_core::config::{ConcordConfig, SelectionMode};
use concord_core::traits::ICaseSelector;

/// Build the selector the configuration asks for.
pub fn selector_from_config(config: &ConcordConfig) -> Box<dyn ICaseSelector> {
    match config.experiment.selection {
        SelectionMode::Sequential => Box::new(SequentialSelector),
        SelectionMode::ActiveLearning => Box::new(ActiveLearningSelector::from_config(
            &config.learning,
            config.experiment.seed,
        )),
    }
}
