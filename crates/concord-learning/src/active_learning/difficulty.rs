//! Difficulty strategies: given the hard history, rank the remaining cases.
//!
//! A strategy only sees entries already classified as hard. Swapping in a
//! different proxy (embedding distance, say) leaves the selector's
//! partitioning and random fallback untouched.

use concord_core::models::{Case, HistoryEntry};

pub trait IDifficultyStrategy {
    /// Pick one element of `remaining`, or `None` to defer to random choice.
    ///
    /// `hard` is never empty and every index in `remaining` addresses `cases`.
    fn pick(&self, cases: &[Case], hard: &[&HistoryEntry], remaining: &[usize]) -> Option<usize>;
}

/// Note length as a difficulty proxy.
///
/// Targets the mean `note_len` of the hard entries and returns the remaining
/// case whose note length (in characters) is closest to it. Equidistant
/// candidates resolve to the one that appears first in `remaining`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteLengthStrategy;

impl NoteLengthStrategy {
    pub fn target_length(hard: &[&HistoryEntry]) -> Option<f64> {
        if hard.is_empty() {
            return None;
        }
        let sum: f64 = hard.iter().map(|e| e.note_len as f64).sum();
        Some(sum / hard.len() as f64)
    }
}

impl IDifficultyStrategy for NoteLengthStrategy {
    fn pick(&self, cases: &[Case], hard: &[&HistoryEntry], remaining: &[usize]) -> Option<usize> {
        let target = Self::target_length(hard)?;

        let mut best: Option<(usize, f64)> = None;
        for &index in remaining {
            let case = cases.get(index)?;
            let distance = (case.note_len() as f64 - target).abs();
            match best {
                // Strict comparison keeps the earliest candidate on ties.
                Some((_, closest)) if distance >= closest => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| index)
    }
}
