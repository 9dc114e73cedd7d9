use concord_core::errors::ConcordResult;
use concord_core::models::{Case, HistoryEntry};
use concord_core::traits::ICaseSelector;

use super::check_remaining;

/// Load order: always the first remaining index.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSelector;

impl ICaseSelector for SequentialSelector {
    fn select(
        &mut self,
        cases: &[Case],
        _history: &[HistoryEntry],
        remaining: &[usize],
    ) -> ConcordResult<usize> {
        check_remaining(cases, remaining)?;
        Ok(remaining[0])
    }
}
