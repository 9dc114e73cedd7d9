//! Loosely-typed knowledge graph as returned by the graph builder.
//!
//! Nothing here is assumed well-formed: ids may be missing, edges may point
//! at nodes that were never declared, and lists may be `null`.

use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub nodes: Vec<GraphNode>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub label: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_text")]
    pub node_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub relation: Option<String>,
}

impl GraphNode {
    pub fn new(id: &str, label: &str, node_type: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            label: Some(label.to_string()),
            node_type: Some(node_type.to_string()),
        }
    }
}

impl GraphEdge {
    pub fn new(source: &str, target: &str, relation: &str) -> Self {
        Self {
            source: Some(source.to_string()),
            target: Some(target.to_string()),
            relation: Some(relation.to_string()),
        }
    }
}
