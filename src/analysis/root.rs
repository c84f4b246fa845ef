//! Root selection policies.
//!
//! The dominator computation takes its root as given; these helpers only
//! suggest one for datasets that do not name it.

use serde::Deserialize;
use tracing::debug;

use crate::analysis::graph::{compute_predecessors, DirectedGraph};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootStrategy {
    /// A node without predecessors, preferring the largest out-degree
    #[default]
    Source,
    /// The first declared node
    First,
}

impl RootStrategy {
    pub fn select<G: DirectedGraph>(self, graph: &G) -> Option<G::Node> {
        match self {
            RootStrategy::Source => select_root(graph),
            RootStrategy::First => first_node(graph),
        }
    }
}

/// Nodes with in-degree zero, in declaration order.
pub fn source_nodes<G: DirectedGraph>(graph: &G) -> Vec<G::Node> {
    let predecessors = compute_predecessors(graph);
    graph
        .nodes()
        .filter(|node| predecessors.get(*node).map_or(true, Vec::is_empty))
        .cloned()
        .collect()
}

/// Picks an in-degree-zero node with the maximum out-degree. Ties go to the
/// node declared first. Returns `None` if every node has a predecessor.
pub fn select_root<G: DirectedGraph>(graph: &G) -> Option<G::Node> {
    let sources = source_nodes(graph);
    debug!("{} source node(s) are root candidates", sources.len());

    let mut best: Option<(usize, G::Node)> = None;
    for node in sources {
        let degree = graph.successors(&node).len();
        if best.as_ref().map_or(true, |(best_degree, _)| degree > *best_degree) {
            best = Some((degree, node));
        }
    }
    best.map(|(_, node)| node)
}

/// The first declared node, whatever its degree.
pub fn first_node<G: DirectedGraph>(graph: &G) -> Option<G::Node> {
    graph.nodes().next().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::graph::AdjacencyGraph;

    #[test]
    fn test_prefers_largest_out_degree() {
        // 1 and 5 are both sources, 5 has more successors
        let graph: AdjacencyGraph<u32> = [(1, 2), (5, 2), (5, 3), (2, 3)].into_iter().collect();

        assert_eq!(source_nodes(&graph), vec![1, 5]);
        assert_eq!(select_root(&graph), Some(5));
        assert_eq!(RootStrategy::First.select(&graph), Some(1));
    }

    #[test]
    fn test_ties_go_to_first_declared() {
        let graph: AdjacencyGraph<u32> = [(4, 1), (3, 1)].into_iter().collect();
        assert_eq!(select_root(&graph), Some(4));
    }

    #[test]
    fn test_no_source() {
        let graph: AdjacencyGraph<u32> = [(1, 2), (2, 1)].into_iter().collect();
        assert_eq!(RootStrategy::Source.select(&graph), None);

        let empty: AdjacencyGraph<u32> = AdjacencyGraph::new();
        assert_eq!(select_root(&empty), None);
        assert_eq!(first_node(&empty), None);
    }

    #[test]
    fn test_isolated_node_is_a_source() {
        let mut graph: AdjacencyGraph<u32> = [(1, 2), (2, 1)].into_iter().collect();
        graph.add_node(9);
        assert_eq!(select_root(&graph), Some(9));
    }
}
