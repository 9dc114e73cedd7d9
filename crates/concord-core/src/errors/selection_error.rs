/// Errors raised by case selectors. Both indicate a caller bookkeeping bug.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("no remaining cases to select from")]
    NoRemainingCases,

    #[error("remaining index {index} is outside the case list (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
