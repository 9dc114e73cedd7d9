//! Strict-then-fallback parse boundary for graph builder output.
//!
//! Generative services wrap JSON in prose or code fences often enough that a
//! single retry on the outermost `{...}` span is worth making. Nothing beyond
//! that retry is attempted.

use concord_core::constants::PARSE_EXCERPT_CHARS;
use concord_core::errors::GraphError;
use concord_core::models::KnowledgeGraph;
use tracing::debug;

/// Parse a raw graph builder payload.
///
/// # Examples
///
/// ```
/// use concord_graph::parse_graph;
///
/// let raw = "Here you go:\n```json\n{\"nodes\": [{\"id\": \"n1\"}], \"edges\": []}\n```";
/// let graph = parse_graph(raw).unwrap();
/// assert_eq!(graph.nodes.len(), 1);
///
/// assert!(parse_graph("no graph today").is_err());
/// ```
pub fn parse_graph(raw: &str) -> Result<KnowledgeGraph, GraphError> {
    let strict_err = match serde_json::from_str::<KnowledgeGraph>(raw) {
        Ok(graph) => return Ok(graph),
        Err(e) => e,
    };

    let Some(span) = outermost_object(raw) else {
        return Err(unparseable(
            format!("no JSON object found ({strict_err})"),
            raw,
        ));
    };

    debug!(
        error = %strict_err,
        span_len = span.len(),
        "strict graph parse failed, retrying on outermost object"
    );

    serde_json::from_str::<KnowledgeGraph>(span)
        .map_err(|e| unparseable(format!("fallback parse failed: {e}"), raw))
}

/// Substring from the first `{` to the last `}`, inclusive.
pub fn outermost_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn unparseable(reason: String, raw: &str) -> GraphError {
    GraphError::Unparseable {
        reason,
        excerpt: raw.chars().take(PARSE_EXCERPT_CHARS).collect(),
    }
}
