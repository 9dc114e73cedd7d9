//! Case loader for pre-joined JSON Lines files.
//!
//! One `Case` object per line; blank lines are skipped. Joining raw clinical
//! tables into this shape happens upstream.

use std::path::Path;

use concord_core::errors::StorageError;
use concord_core::models::Case;
use tracing::info;

pub fn load_cases(path: impl AsRef<Path>) -> Result<Vec<Case>, StorageError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let cases = parse_cases(&contents, &path.display().to_string())?;

    let labelled = cases.iter().filter(|c| c.has_ground_truth()).count();
    info!(
        path = %path.display(),
        cases = cases.len(),
        labelled,
        "cases loaded"
    );
    Ok(cases)
}

fn parse_cases(contents: &str, origin: &str) -> Result<Vec<Case>, StorageError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Case>(line).map_err(|e| StorageError::MalformedCase {
                path: origin.to_string(),
                line: i + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}
