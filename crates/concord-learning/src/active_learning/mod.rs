//! Active learning loop: hard-case partitioning, difficulty strategies, selectors.

pub mod difficulty;
pub mod selector;
pub mod sequential;

pub use difficulty::{IDifficultyStrategy, NoteLengthStrategy};
pub use selector::ActiveLearningSelector;
pub use sequential::SequentialSelector;

use concord_core::errors::{ConcordResult, SelectionError};
use concord_core::models::Case;

/// Reject an empty remaining set and indices that do not address a case.
pub(crate) fn check_remaining(cases: &[Case], remaining: &[usize]) -> ConcordResult<()> {
    if remaining.is_empty() {
        return Err(SelectionError::NoRemainingCases.into());
    }
    if let Some(&index) = remaining.iter().find(|&&i| i >= cases.len()) {
        return Err(SelectionError::IndexOutOfRange {
            index,
            len: cases.len(),
        }
        .into());
    }
    Ok(())
}
