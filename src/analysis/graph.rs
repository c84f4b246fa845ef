use std::collections::HashMap;
use std::hash::Hash;

use petgraph::graph::{Graph, IndexType};
use petgraph::visit::EdgeRef;
use petgraph::Directed;

mod directed_graph;

pub use directed_graph::{compute_predecessors, DirectedGraph};

/// Successor-list graph that remembers the order nodes and edges were added.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph<NodeId> {
    /// Declared nodes in insertion order
    nodes: Vec<NodeId>,
    /// Position of each node in `nodes`
    index: HashMap<NodeId, usize>,
    /// Successor lists, parallel to `nodes`
    successors: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl<NodeId> Default for AdjacencyGraph<NodeId> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            successors: Vec::new(),
            edge_count: 0,
        }
    }
}

impl<NodeId> AdjacencyGraph<NodeId>
where
    NodeId: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            successors: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Declares `node` and returns its position. Adding a node twice is a no-op.
    pub fn add_node(&mut self, node: NodeId) -> usize {
        if let Some(&position) = self.index.get(&node) {
            return position;
        }
        let position = self.nodes.len();
        self.index.insert(node.clone(), position);
        self.nodes.push(node);
        self.successors.push(Vec::new());
        position
    }

    /// Adds the edge `from -> to`, declaring both endpoints.
    /// Parallel edges and self-loops are kept as given.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        let position = self.add_node(from);
        self.add_node(to.clone());
        self.successors[position].push(to);
        self.edge_count += 1;
    }

    pub fn successors(&self, node: &NodeId) -> &[NodeId] {
        self.index
            .get(node)
            .map(|&position| self.successors[position].as_slice())
            .unwrap_or(&[])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    /// All edges in declaration order of their source node.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.nodes
            .iter()
            .zip(&self.successors)
            .flat_map(|(from, successors)| successors.iter().map(move |to| (from, to)))
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    pub fn out_degree(&self, node: &NodeId) -> usize {
        self.successors(node).len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<NodeId> DirectedGraph for AdjacencyGraph<NodeId>
where
    NodeId: Eq + Hash + Clone,
{
    type Node = NodeId;

    fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    fn successors(&self, node: &NodeId) -> &[NodeId] {
        AdjacencyGraph::successors(self, node)
    }

    fn contains(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<NodeId> FromIterator<(NodeId, NodeId)> for AdjacencyGraph<NodeId>
where
    NodeId: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (NodeId, NodeId)>>(edges: I) -> Self {
        let mut graph = Self::new();
        graph.extend(edges);
        graph
    }
}

impl<NodeId> Extend<(NodeId, NodeId)> for AdjacencyGraph<NodeId>
where
    NodeId: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (NodeId, NodeId)>>(&mut self, edges: I) {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }
}

/// Converts a petgraph graph, using node weights as node ids.
/// Nodes with equal weights collapse into one.
impl<NodeId, E, Ix> From<&Graph<NodeId, E, Directed, Ix>> for AdjacencyGraph<NodeId>
where
    NodeId: Eq + Hash + Clone,
    Ix: IndexType,
{
    fn from(graph: &Graph<NodeId, E, Directed, Ix>) -> Self {
        let mut adjacency = Self::with_capacity(graph.node_count());
        for node in graph.node_indices() {
            adjacency.add_node(graph[node].clone());
        }
        for edge in graph.edge_references() {
            adjacency.add_edge(graph[edge.source()].clone(), graph[edge.target()].clone());
        }
        adjacency
    }
}
