//! Per-agent accuracy counters.
//!
//! - Reputation is `accepted / total`.
//! - No observations means the neutral prior, `0.5`, not distrust.
//!
//! # Examples
//!
//! ```
//! use concord_core::models::ReputationRecord;
//!
//! let mut record = ReputationRecord::default();
//! assert!((record.reputation() - 0.5).abs() < f64::EPSILON);
//!
//! record.record_outcome(true);
//! record.record_outcome(false);
//! assert_eq!((record.accepted, record.total), (1, 2));
//! assert!((record.reputation() - 0.5).abs() < f64::EPSILON);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::NEUTRAL_REPUTATION;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationRecord {
    pub accepted: u64,
    pub total: u64,
}

impl ReputationRecord {
    pub fn reputation(&self) -> f64 {
        if self.total == 0 {
            return NEUTRAL_REPUTATION;
        }
        self.accepted as f64 / self.total as f64
    }

    pub fn record_outcome(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.accepted += 1;
        }
    }

    /// `accepted <= total`.
    pub fn is_consistent(&self) -> bool {
        self.accepted <= self.total
    }
}

/// Full persisted state: agent id → record.
pub type ReputationSnapshot = BTreeMap<String, ReputationRecord>;
