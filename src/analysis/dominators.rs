//! Immediate dominators by the simple Lengauer–Tarjan algorithm.
//!
//! "A Fast Algorithm for Finding Dominators in a Flowgraph",
//! Thomas Lengauer and Robert Endre Tarjan, TOPLAS 1979.
//!
//! The computation runs in four phases over DFS numbers:
//! preorder numbering ([`dfs`]), then the semidominator and bucket pass driven
//! by the link-eval forest ([`forest`]), then a forward pass that fixes up
//! dominators that sit above their semidominator ([`lengauer_tarjan`]).

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::graph::DirectedGraph;

mod dfs;
pub mod forest;
mod lengauer_tarjan;

use dfs::DfsNumbering;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DominatorError {
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("root node is not part of the graph")]
    InvalidRoot,
    #[error("{count} node(s) are unreachable from the root")]
    Unreachable { count: usize },
}

/// Maps every node reachable from `root`, other than `root`, to its immediate
/// dominator. Nodes that cannot be reached are left out.
pub fn compute_dominator_tree<G: DirectedGraph>(
    graph: &G,
    root: G::Node,
) -> Result<HashMap<G::Node, G::Node>, DominatorError> {
    DominatorTree::compute(graph, root).map(DominatorTree::into_map)
}

/// The dominator tree of the part of a graph reachable from its root.
#[derive(Debug, Clone)]
pub struct DominatorTree<NodeId> {
    /// Reachable nodes in DFS preorder; the root comes first
    preorder: Vec<NodeId>,
    /// DFS number of each reachable node
    index: HashMap<NodeId, usize>,
    /// Immediate dominator by DFS number. The root maps to itself.
    idom: Vec<usize>,
    /// Declared nodes the traversal never reached
    unreachable: Vec<NodeId>,
}

impl<NodeId> DominatorTree<NodeId>
where
    NodeId: Eq + Hash + Clone,
{
    /// Computes the dominator tree of `graph` rooted at `root`.
    ///
    /// Unreachable nodes are not an error here; they are listed in
    /// [`DominatorTree::unreachable`].
    pub fn compute<G: DirectedGraph<Node = NodeId>>(
        graph: &G,
        root: NodeId,
    ) -> Result<Self, DominatorError> {
        if graph.node_count() == 0 {
            return Err(DominatorError::EmptyGraph);
        }
        if !graph.contains(&root) {
            return Err(DominatorError::InvalidRoot);
        }

        let numbering = DfsNumbering::compute(graph, root);
        debug!(
            "dfs numbered {} of {} declared nodes",
            numbering.len(),
            graph.node_count()
        );

        let idom = lengauer_tarjan::immediate_dominators(&numbering.parent, &numbering.predecessors);

        let unreachable: Vec<NodeId> = graph
            .nodes()
            .filter(|node| !numbering.index.contains_key(*node))
            .cloned()
            .collect();
        if !unreachable.is_empty() {
            warn!("{} node(s) are unreachable from the root", unreachable.len());
        }

        Ok(Self {
            preorder: numbering.vertex,
            index: numbering.index,
            idom,
            unreachable,
        })
    }

    /// Assembles a tree from raw tables, for checking malformed trees.
    #[cfg(test)]
    pub(crate) fn from_parts(preorder: Vec<NodeId>, idom: Vec<usize>) -> Self {
        let index = preorder
            .iter()
            .enumerate()
            .map(|(i, node)| (node.clone(), i))
            .collect();
        Self {
            preorder,
            index,
            idom,
            unreachable: Vec::new(),
        }
    }

    /// Like [`DominatorTree::compute`], but every declared node must be
    /// reachable from `root`.
    pub fn compute_total<G: DirectedGraph<Node = NodeId>>(
        graph: &G,
        root: NodeId,
    ) -> Result<Self, DominatorError> {
        let tree = Self::compute(graph, root)?;
        if !tree.unreachable.is_empty() {
            return Err(DominatorError::Unreachable {
                count: tree.unreachable.len(),
            });
        }
        Ok(tree)
    }

    /// Returns the root node
    pub fn root(&self) -> &NodeId {
        &self.preorder[0]
    }

    /// Number of reachable nodes, the root included
    pub fn len(&self) -> usize {
        self.preorder.len()
    }

    /// Always false: a computed tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.preorder.is_empty()
    }

    pub fn is_reachable(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    /// Reachable nodes in DFS preorder.
    pub fn preorder(&self) -> &[NodeId] {
        &self.preorder
    }

    /// Declared nodes that are not reachable from the root.
    pub fn unreachable(&self) -> &[NodeId] {
        &self.unreachable
    }

    /// Returns the immediate dominator of a node, if any.
    /// The root and unreachable nodes have none.
    pub fn immediate_dominator(&self, node: &NodeId) -> Option<&NodeId> {
        match self.index.get(node) {
            Some(&0) | None => None,
            Some(&i) => Some(&self.preorder[self.idom[i]]),
        }
    }

    /// Returns true if `dominator` dominates `node`
    pub fn dominates(&self, dominator: &NodeId, node: &NodeId) -> bool {
        let (Some(&dominator), Some(&node)) = (self.index.get(dominator), self.index.get(node))
        else {
            return false;
        };

        // A dominator always has a smaller DFS number than what it dominates.
        let mut current = node;
        while current > dominator {
            current = self.idom[current];
        }
        current == dominator
    }

    /// Returns true if `dominator` strictly dominates `node` (dominates but is not equal)
    pub fn strictly_dominates(&self, dominator: &NodeId, node: &NodeId) -> bool {
        *dominator != *node && self.dominates(dominator, node)
    }

    /// Walks from `node` up to the root, yielding `node` first.
    /// Yields nothing for unreachable nodes.
    pub fn dominators_of(&self, node: &NodeId) -> DominatorIter<'_, NodeId> {
        DominatorIter {
            tree: self,
            current: self.index.get(node).copied(),
        }
    }

    /// Returns all nodes that are dominated by the given node, itself included
    pub fn dominated_by(&self, dominator: &NodeId) -> Vec<NodeId> {
        self.preorder
            .iter()
            .filter(|&node| self.dominates(dominator, node))
            .cloned()
            .collect()
    }

    /// Nodes whose immediate dominator is `node`, in DFS preorder.
    pub fn children(&self, node: &NodeId) -> Vec<NodeId> {
        let Some(&parent) = self.index.get(node) else {
            return Vec::new();
        };
        (1..self.preorder.len())
            .filter(|&i| self.idom[i] == parent)
            .map(|i| self.preorder[i].clone())
            .collect()
    }

    /// Returns the dominator tree as a mapping from immediate dominator to children
    pub fn dominator_tree(&self) -> HashMap<NodeId, Vec<NodeId>> {
        let mut tree: HashMap<NodeId, Vec<NodeId>> = self
            .preorder
            .iter()
            .map(|node| (node.clone(), Vec::new()))
            .collect();

        for (i, node) in self.preorder.iter().enumerate().skip(1) {
            if let Some(children) = tree.get_mut(&self.preorder[self.idom[i]]) {
                children.push(node.clone());
            }
        }

        tree
    }

    /// The deepest node that dominates both `a` and `b`.
    pub fn nearest_common_dominator(&self, a: &NodeId, b: &NodeId) -> Option<&NodeId> {
        let mut a = *self.index.get(a)?;
        let mut b = *self.index.get(b)?;
        while a != b {
            if a > b {
                a = self.idom[a];
            } else {
                b = self.idom[b];
            }
        }
        Some(&self.preorder[a])
    }

    /// `(node, immediate dominator)` for every reachable node but the root,
    /// in DFS preorder.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.preorder
            .iter()
            .enumerate()
            .skip(1)
            .map(move |(i, node)| (node, &self.preorder[self.idom[i]]))
    }

    pub fn into_map(self) -> HashMap<NodeId, NodeId> {
        let mut map = HashMap::with_capacity(self.preorder.len().saturating_sub(1));
        for (i, node) in self.preorder.iter().enumerate().skip(1) {
            map.insert(node.clone(), self.preorder[self.idom[i]].clone());
        }
        map
    }
}

/// Iterator over a node and its dominators, ending at the root.
pub struct DominatorIter<'a, NodeId> {
    tree: &'a DominatorTree<NodeId>,
    current: Option<usize>,
}

impl<'a, NodeId> Iterator for DominatorIter<'a, NodeId> {
    type Item = &'a NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = (current != 0).then(|| self.tree.idom[current]);
        Some(&self.tree.preorder[current])
    }
}
