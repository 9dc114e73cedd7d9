use crate::errors::ConcordResult;
use crate::models::KnowledgeGraph;

/// External service that turns a clinical note into a knowledge graph.
///
/// Blocking. No timeout is imposed by the caller.
pub trait IGraphBuilder {
    fn build(&self, note: &str) -> ConcordResult<KnowledgeGraph>;
}
