//! Property tests for connected-component counting.

use std::collections::{HashMap, HashSet, VecDeque};

use concord_core::models::{GraphEdge, GraphNode, KnowledgeGraph};
use concord_graph::count_components;
use proptest::prelude::*;

fn build(n: usize, edges: &[(usize, usize)]) -> KnowledgeGraph {
    KnowledgeGraph {
        nodes: (0..n)
            .map(|i| GraphNode::new(&format!("n{i}"), &format!("Node {i}"), "other"))
            .collect(),
        edges: edges
            .iter()
            .map(|&(s, t)| GraphEdge::new(&format!("n{s}"), &format!("n{t}"), "related"))
            .collect(),
    }
}

/// Breadth-first reference count over the same undirected adjacency.
fn bfs_components(n: usize, edges: &[(usize, usize)]) -> usize {
    let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
    for &(s, t) in edges {
        if s < n && t < n {
            adj.entry(s).or_default().push(t);
            adj.entry(t).or_default().push(s);
        }
    }
    let mut seen = HashSet::new();
    let mut count = 0;
    for start in 0..n {
        if !seen.insert(start) {
            continue;
        }
        count += 1;
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            for &v in adj.get(&u).into_iter().flatten() {
                if seen.insert(v) {
                    queue.push_back(v);
                }
            }
        }
    }
    count
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n.max(1), 0..n.max(1)), 0..n * 2 + 1)
}

proptest! {
    #[test]
    fn edgeless_graph_counts_every_node(n in 0_usize..64) {
        prop_assert_eq!(count_components(&build(n, &[])), n);
    }

    #[test]
    fn chained_graph_is_one_component(n in 1_usize..64) {
        let chain: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
        prop_assert_eq!(count_components(&build(n, &chain)), 1);
    }

    #[test]
    fn dangling_edge_never_changes_count(
        (n, edges) in (1_usize..30).prop_flat_map(|n| (Just(n), edge_strategy(n))),
        anchor in 0_usize..30,
    ) {
        let base = build(n, &edges);
        let mut dangling = base.clone();
        dangling.edges.push(GraphEdge::new(&format!("n{}", anchor % n), "missing", "related"));
        prop_assert_eq!(count_components(&base), count_components(&dangling));
    }

    #[test]
    fn matches_breadth_first_reference(
        (n, edges) in (0_usize..40).prop_flat_map(|n| (Just(n), edge_strategy(n))),
    ) {
        prop_assert_eq!(count_components(&build(n, &edges)), bfs_components(n, &edges));
    }
}
