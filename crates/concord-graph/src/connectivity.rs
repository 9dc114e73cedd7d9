//! Connected components of a knowledge graph, edges taken as undirected.
//!
//! - The node universe is the set of declared node ids; duplicates collapse.
//! - Edges with an endpoint outside the universe are dropped.
//! - Self-loops never merge anything.
//! - Isolated nodes are singleton components; no nodes means zero components.

use std::collections::HashMap;

use concord_core::models::KnowledgeGraph;
use petgraph::unionfind::UnionFind;
use tracing::debug;

/// Component count plus how many edges actually contributed to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectivityReport {
    pub components: usize,
    /// Distinct declared node ids.
    pub nodes: usize,
    pub edges_used: usize,
    /// Edges with a missing or unknown endpoint.
    pub edges_dropped: usize,
    pub self_loops: usize,
}

/// Count connected components.
///
/// # Examples
///
/// ```
/// use concord_core::models::{GraphEdge, GraphNode, KnowledgeGraph};
/// use concord_graph::count_components;
///
/// let graph = KnowledgeGraph {
///     nodes: vec![
///         GraphNode::new("n1", "patient", "patient"),
///         GraphNode::new("n2", "fever", "symptom"),
///         GraphNode::new("n3", "pneumonia", "diagnosis"),
///     ],
///     edges: vec![GraphEdge::new("n1", "n2", "has_symptom")],
/// };
/// assert_eq!(count_components(&graph), 2);
/// ```
pub fn count_components(graph: &KnowledgeGraph) -> usize {
    analyze(graph).components
}

/// Count connected components and report edge usage.
pub fn analyze(graph: &KnowledgeGraph) -> ConnectivityReport {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(graph.nodes.len());
    for id in graph.nodes.iter().filter_map(|n| n.id.as_deref()) {
        let next = index.len();
        index.entry(id).or_insert(next);
    }

    let mut report = ConnectivityReport {
        nodes: index.len(),
        ..Default::default()
    };

    let mut sets = UnionFind::<usize>::new(index.len());
    let mut merges = 0;
    for edge in &graph.edges {
        let source = edge.source.as_deref().and_then(|s| index.get(s));
        let target = edge.target.as_deref().and_then(|t| index.get(t));
        match (source, target) {
            (Some(&a), Some(&b)) if a == b => report.self_loops += 1,
            (Some(&a), Some(&b)) => {
                report.edges_used += 1;
                if sets.union(a, b) {
                    merges += 1;
                }
            }
            _ => report.edges_dropped += 1,
        }
    }
    report.components = report.nodes - merges;

    if report.edges_dropped > 0 || report.self_loops > 0 {
        debug!(
            nodes = report.nodes,
            edges_dropped = report.edges_dropped,
            self_loops = report.self_loops,
            "knowledge graph has edges that do not affect connectivity"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_core::models::{GraphEdge, GraphNode};

    fn nodes(ids: &[&str]) -> Vec<GraphNode> {
        ids.iter().map(|id| GraphNode::new(id, id, "other")).collect()
    }

    #[test]
    fn one_edge_among_three_nodes_leaves_two_components() {
        let graph = KnowledgeGraph {
            nodes: nodes(&["n1", "n2", "n3"]),
            edges: vec![GraphEdge::new("n1", "n2", "has_symptom")],
        };
        let report = analyze(&graph);
        assert_eq!(report.components, 2);
        assert_eq!(report.edges_used, 1);
    }

    #[test]
    fn empty_graph_has_zero_components() {
        assert_eq!(count_components(&KnowledgeGraph::default()), 0);
    }

    #[test]
    fn edges_only_graph_has_zero_components() {
        let graph = KnowledgeGraph {
            nodes: vec![],
            edges: vec![GraphEdge::new("n1", "n2", "supports")],
        };
        let report = analyze(&graph);
        assert_eq!(report.components, 0);
        assert_eq!(report.edges_dropped, 1);
    }

    #[test]
    fn edge_direction_is_ignored() {
        let graph = KnowledgeGraph {
            nodes: nodes(&["a", "b", "c"]),
            edges: vec![
                GraphEdge::new("a", "b", "supports"),
                GraphEdge::new("c", "b", "supports"),
            ],
        };
        assert_eq!(count_components(&graph), 1);
    }

    #[test]
    fn dangling_and_partial_edges_are_dropped() {
        let mut graph = KnowledgeGraph {
            nodes: nodes(&["a", "b"]),
            edges: vec![GraphEdge::new("a", "ghost", "supports")],
        };
        graph.edges.push(GraphEdge {
            source: Some("a".into()),
            target: None,
            relation: None,
        });
        let report = analyze(&graph);
        assert_eq!(report.components, 2);
        assert_eq!(report.edges_dropped, 2);
    }

    #[test]
    fn self_loop_is_a_no_op() {
        let graph = KnowledgeGraph {
            nodes: nodes(&["a", "b"]),
            edges: vec![GraphEdge::new("a", "a", "worsens")],
        };
        let report = analyze(&graph);
        assert_eq!(report.components, 2);
        assert_eq!(report.self_loops, 1);
    }

    #[test]
    fn duplicate_ids_collapse_and_idless_nodes_are_ignored() {
        let mut graph = KnowledgeGraph {
            nodes: nodes(&["a", "a", "b"]),
            edges: vec![],
        };
        graph.nodes.push(GraphNode::default());
        let report = analyze(&graph);
        assert_eq!(report.nodes, 2);
        assert_eq!(report.components, 2);
    }

    #[test]
    fn redundant_edges_do_not_overcount_merges() {
        let graph = KnowledgeGraph {
            nodes: nodes(&["a", "b", "c"]),
            edges: vec![
                GraphEdge::new("a", "b", "x"),
                GraphEdge::new("b", "a", "x"),
                GraphEdge::new("a", "b", "y"),
            ],
        };
        assert_eq!(count_components(&graph), 2);
    }
}
