//! Append-only CSV log of evaluated cases.
//!
//! The header is written exactly once, when the file is first created (or
//! found empty). Reopening an existing log appends rows under the old header.
//! Rows are flushed one at a time; a crash mid-iteration loses that
//! iteration's row but never corrupts earlier ones.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use concord_core::constants::DIAGNOSIS_DELIMITER;
use concord_core::errors::{ConcordResult, StorageError};
use concord_core::models::{AgentId, HistoryEntry};
use tracing::{debug, info};

/// Column names for a log comparing `agents` (in invocation order).
pub fn header(agents: &[AgentId]) -> Vec<String> {
    let mut columns: Vec<String> = [
        "iteration",
        "case_index",
        "case_id",
        "subject_id",
        "hadm_id",
        "note_len",
        "ground_truth",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();
    columns.extend(agents.iter().map(|a| format!("diag_{a}")));
    columns.extend(agents.iter().map(|a| format!("correct_{a}")));
    columns.extend(agents.iter().map(|a| format!("reputation_{a}")));
    columns.extend(
        [
            "discordance",
            "num_components",
            "time_total",
            "time_graph",
            "time_agents",
        ]
        .iter()
        .map(|c| c.to_string()),
    );
    columns
}

pub struct HistoryLog {
    path: PathBuf,
    agents: Vec<AgentId>,
    writer: csv::Writer<File>,
}

impl HistoryLog {
    /// Open (creating if needed) the log at `path` for the given agents.
    pub fn open(path: impl AsRef<Path>, agents: &[AgentId]) -> ConcordResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }

        let is_new = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StorageError::io(&path, e))?;

        let mut log = Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file),
            agents: agents.to_vec(),
            path,
        };

        if is_new {
            log.write_row(header(agents))?;
            info!(path = %log.path.display(), "history log created");
        } else {
            debug!(path = %log.path.display(), "appending to existing history log");
        }
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one evaluated case. Outcomes must match the log's agents, in order.
    pub fn append(&mut self, entry: &HistoryEntry) -> ConcordResult<()> {
        let ids: Vec<&AgentId> = entry.outcomes.iter().map(|o| &o.agent_id).collect();
        if ids.len() != self.agents.len() || ids.iter().zip(&self.agents).any(|(a, b)| *a != b) {
            return Err(self
                .failure(format!(
                    "entry outcomes {ids:?} do not match log agents {:?}",
                    self.agents
                ))
                .into());
        }

        let mut row = vec![
            entry.iteration.to_string(),
            entry.case_index.to_string(),
            entry.case_id.clone(),
            entry.subject_id.clone(),
            entry.hadm_id.clone(),
            entry.note_len.to_string(),
            entry.ground_truth.clone(),
        ];
        row.extend(
            entry
                .outcomes
                .iter()
                .map(|o| o.diagnoses.join(DIAGNOSIS_DELIMITER)),
        );
        row.extend(entry.outcomes.iter().map(|o| o.correct.to_string()));
        row.extend(entry.outcomes.iter().map(|o| o.reputation.to_string()));
        row.extend([
            entry.discordance.to_string(),
            entry.num_components.to_string(),
            entry.timings.total_secs.to_string(),
            entry.timings.graph_secs.to_string(),
            entry.timings.agents_secs.to_string(),
        ]);

        self.write_row(row)?;
        debug!(iteration = entry.iteration, case_id = %entry.case_id, "history row appended");
        Ok(())
    }

    fn write_row(&mut self, row: Vec<String>) -> Result<(), StorageError> {
        self.writer
            .write_record(&row)
            .map_err(|e| self.failure(e.to_string()))?;
        self.writer
            .flush()
            .map_err(|e| StorageError::io(&self.path, e))
    }

    fn failure(&self, reason: String) -> StorageError {
        StorageError::HistoryLog {
            path: self.path.display().to_string(),
            reason,
        }
    }
}
