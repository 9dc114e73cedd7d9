mod agent;
mod case;
mod diagnosis;
mod graph;
mod history;
mod lenient;
mod reputation;

pub use agent::AgentId;
pub use case::Case;
pub use diagnosis::DiagnosisEntry;
pub use graph::{GraphEdge, GraphNode, KnowledgeGraph};
pub use history::{AgentOutcome, HistoryEntry, StageTimings};
pub use reputation::{ReputationRecord, ReputationSnapshot};
