use crate::errors::ConcordResult;
use crate::models::{AgentId, DiagnosisEntry, KnowledgeGraph};

/// One diagnostic agent under evaluation.
pub trait IDiagnostician {
    fn agent_id(&self) -> &AgentId;

    /// Propose diagnoses for a note, optionally informed by its graph.
    fn diagnose(&self, note: &str, graph: &KnowledgeGraph) -> ConcordResult<Vec<DiagnosisEntry>>;
}
