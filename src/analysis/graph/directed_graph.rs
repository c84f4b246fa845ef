use std::{collections::HashMap, hash::Hash};

/// Read-only view of a directed graph given as successor lists.
///
/// Dominator computation only ever walks forward edges; predecessors are
/// discovered on the way, so implementors need not store them.
pub trait DirectedGraph {
    type Node: Eq + Hash + Clone;

    /// Every declared node, in a stable order.
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Successors of `node`, or an empty slice for unknown nodes.
    fn successors(&self, node: &Self::Node) -> &[Self::Node];

    fn contains(&self, node: &Self::Node) -> bool;

    fn node_count(&self) -> usize;
}

// The bare successor mapping. Iteration order follows the hash map, so prefer
// `AdjacencyGraph` when reproducible traversal order matters.
impl<NodeId: Eq + Hash + Clone> DirectedGraph for HashMap<NodeId, Vec<NodeId>> {
    type Node = NodeId;

    fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.keys()
    }

    fn successors(&self, node: &NodeId) -> &[NodeId] {
        self.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn contains(&self, node: &NodeId) -> bool {
        self.contains_key(node)
    }

    fn node_count(&self) -> usize {
        self.len()
    }
}

/// Computes the predecessors for every node in the graph.
///
/// Returns a map where each key is a node and the value is a vector
/// of its predecessor nodes.
pub fn compute_predecessors<G: DirectedGraph>(graph: &G) -> HashMap<G::Node, Vec<G::Node>> {
    let mut predecessors: HashMap<G::Node, Vec<G::Node>> = HashMap::new();

    // Ensure every node has at least an empty Vec in the map
    for node in graph.nodes() {
        predecessors.entry(node.clone()).or_default();
    }

    // Iterate over each node and its successors to build the reverse mapping
    for node in graph.nodes() {
        for successor in graph.successors(node) {
            predecessors
                .entry(successor.clone())
                .or_default()
                .push(node.clone());
        }
    }

    predecessors
}
