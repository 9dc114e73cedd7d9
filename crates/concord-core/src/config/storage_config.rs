use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Locations of the case file and the durable outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON Lines file with one case per line.
    pub cases_path: String,
    /// Directory holding the reputation store and the history log.
    pub output_dir: String,
    /// Reputation store file name, relative to `output_dir`.
    pub reputation_file: String,
    /// History log file name, relative to `output_dir`.
    pub history_file: String,
}

impl StorageConfig {
    pub fn reputation_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.reputation_file)
    }

    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.history_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cases_path: defaults::DEFAULT_CASES_PATH.to_string(),
            output_dir: defaults::DEFAULT_OUTPUT_DIR.to_string(),
            reputation_file: defaults::DEFAULT_REPUTATION_FILE.to_string(),
            history_file: defaults::DEFAULT_HISTORY_FILE.to_string(),
        }
    }
}
