//! Discordance-conditioned case selection.
//!
//! Policy, in order:
//! 1. Empty `remaining` is a caller error.
//! 2. No history yet: uniform random over `remaining`.
//! 3. History entries with `discordance >= threshold` are "hard". None hard:
//!    uniform random.
//! 4. Otherwise the difficulty strategy picks from `remaining`. A strategy
//!    that declines falls back to uniform random.

use concord_core::config::LearningConfig;
use concord_core::errors::{ConcordResult, SelectionError};
use concord_core::models::{Case, HistoryEntry};
use concord_core::traits::ICaseSelector;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::check_remaining;
use super::difficulty::{IDifficultyStrategy, NoteLengthStrategy};

pub struct ActiveLearningSelector<S = NoteLengthStrategy> {
    strategy: S,
    threshold: f64,
    rng: StdRng,
}

impl ActiveLearningSelector<NoteLengthStrategy> {
    /// Note-length strategy with the configured threshold. A `seed` makes the
    /// random fallback reproducible.
    pub fn from_config(config: &LearningConfig, seed: Option<u64>) -> Self {
        Self::new(NoteLengthStrategy, config.high_discordance_threshold, seed)
    }
}

impl<S: IDifficultyStrategy> ActiveLearningSelector<S> {
    pub fn new(strategy: S, threshold: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            strategy,
            threshold,
            rng,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// History entries at or above the discordance threshold.
    pub fn hard_entries<'h>(&self, history: &'h [HistoryEntry]) -> Vec<&'h HistoryEntry> {
        history
            .iter()
            .filter(|e| e.discordance >= self.threshold)
            .collect()
    }

    fn random(&mut self, remaining: &[usize]) -> ConcordResult<usize> {
        remaining
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| SelectionError::NoRemainingCases.into())
    }
}

impl<S: IDifficultyStrategy> ICaseSelector for ActiveLearningSelector<S> {
    fn select(
        &mut self,
        cases: &[Case],
        history: &[HistoryEntry],
        remaining: &[usize],
    ) -> ConcordResult<usize> {
        check_remaining(cases, remaining)?;

        if history.is_empty() {
            debug!(remaining = remaining.len(), "no history yet, random pick");
            return self.random(remaining);
        }

        let hard = self.hard_entries(history);
        if hard.is_empty() {
            debug!(
                history = history.len(),
                threshold = self.threshold,
                "no high-discordance history, random pick"
            );
            return self.random(remaining);
        }

        match self.strategy.pick(cases, &hard, remaining) {
            Some(index) if remaining.contains(&index) => {
                debug!(index, hard = hard.len(), "difficulty strategy pick");
                Ok(index)
            }
            _ => {
                debug!("difficulty strategy declined, random pick");
                self.random(remaining)
            }
        }
    }
}
