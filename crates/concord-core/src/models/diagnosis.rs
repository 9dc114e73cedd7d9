use serde::{Deserialize, Serialize};

use super::lenient;

/// One diagnosis proposed by an agent. Only `name` feeds scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisEntry {
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub name: String,
    /// Advisory only, nominally in `[0, 1]`.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub probability: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub justification: String,
}

impl DiagnosisEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
