use serde::{Deserialize, Serialize};

use super::lenient;

/// One clinical note with its optional reference diagnosis.
///
/// Owned by whoever loaded it; the core refers to cases by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub subject_id: String,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub hadm_id: String,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub note: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub ground_truth: Option<String>,
}

impl Case {
    /// The reference label, if present and not blank.
    pub fn ground_truth(&self) -> Option<&str> {
        self.ground_truth
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn has_ground_truth(&self) -> bool {
        self.ground_truth().is_some()
    }

    /// Note length in characters (Unicode scalar values), not bytes.
    pub fn note_len(&self) -> usize {
        self.note.chars().count()
    }
}
