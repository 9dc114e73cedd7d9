use serde::{Deserialize, Serialize};

use super::AgentId;

/// What one agent produced for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub agent_id: AgentId,
    /// Diagnosis names in the order the agent returned them.
    pub diagnoses: Vec<String>,
    pub correct: bool,
    /// Reputation right after this outcome was recorded.
    pub reputation: f64,
}

/// Wall-clock seconds spent in each stage of an iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimings {
    pub graph_secs: f64,
    pub agents_secs: f64,
    pub total_secs: f64,
}

/// One evaluated case. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based iteration number, counting skipped iterations too.
    pub iteration: usize,
    /// Position of the case in the loaded case list.
    pub case_index: usize,
    pub case_id: String,
    pub subject_id: String,
    pub hadm_id: String,
    /// Note length in characters.
    pub note_len: usize,
    pub ground_truth: String,
    /// One outcome per agent, in invocation order.
    pub outcomes: Vec<AgentOutcome>,
    pub discordance: f64,
    pub num_components: usize,
    pub timings: StageTimings,
}
