//! Wire format for the graph builder and diagnostic agents.

use concord_core::models::{DiagnosisEntry, KnowledgeGraph};
use concord_graph::outermost_object;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Body POSTed to the graph builder.
#[derive(Debug, Serialize)]
pub struct GraphRequest<'a> {
    pub note: &'a str,
}

/// Body POSTed to a diagnostic agent.
#[derive(Debug, Serialize)]
pub struct DiagnoseRequest<'a> {
    pub agent_id: &'a str,
    pub note: &'a str,
    pub graph: &'a KnowledgeGraph,
}

/// Read the `diagnoses` list out of an agent response.
///
/// Tries a strict parse, then the outermost `{...}` span. A body that still
/// does not parse, or whose `diagnoses` is not a list, yields an empty list:
/// the agent is scored as having named nothing. List elements that are not
/// diagnosis objects are dropped.
///
/// # Examples
///
/// ```
/// use concord_runner::transport::parse_diagnoses;
///
/// let raw = "Sure!\n{\"diagnoses\": [{\"name\": \"Pneumonia\", \"probability\": 0.8}]}";
/// let entries = parse_diagnoses(raw);
/// assert_eq!(entries[0].name, "Pneumonia");
///
/// assert!(parse_diagnoses("I cannot answer that.").is_empty());
/// ```
pub fn parse_diagnoses(raw: &str) -> Vec<DiagnosisEntry> {
    let value = serde_json::from_str::<Value>(raw).ok().or_else(|| {
        outermost_object(raw).and_then(|span| serde_json::from_str::<Value>(span).ok())
    });

    let Some(value) = value else {
        warn!(body_len = raw.len(), "agent response is not JSON, no diagnoses read");
        return Vec::new();
    };
    let Some(items) = value.get("diagnoses").and_then(Value::as_array) else {
        warn!("agent response has no diagnoses list");
        return Vec::new();
    };

    let entries: Vec<DiagnosisEntry> = items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();
    if entries.len() < items.len() {
        debug!(
            dropped = items.len() - entries.len(),
            "non-object diagnosis entries dropped"
        );
    }
    entries
}
