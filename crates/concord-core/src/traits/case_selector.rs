use crate::errors::ConcordResult;
use crate::models::{Case, HistoryEntry};

/// Picks the next case to evaluate.
///
/// The returned index is always an element of `remaining`. An empty
/// `remaining` is a caller error.
pub trait ICaseSelector {
    fn select(
        &mut self,
        cases: &[Case],
        history: &[HistoryEntry],
        remaining: &[usize],
    ) -> ConcordResult<usize>;
}
