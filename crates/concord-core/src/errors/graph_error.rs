/// Errors at the knowledge-graph parse boundary.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Neither the raw payload nor its outermost `{...}` span is a graph document.
    #[error("unparseable knowledge graph ({reason}): {excerpt:?}")]
    Unparseable { reason: String, excerpt: String },
}
