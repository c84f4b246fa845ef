//! Brute-force verification of a computed dominator tree.
//!
//! Every check re-derives dominance from plain reachability: `d` dominates
//! `w` exactly when `w` cannot be reached from the root once `d` is removed.
//! That costs one traversal per reachable node, so this is meant for tests and
//! small datasets.

use std::collections::HashSet;
use std::fmt::Debug;

use thiserror::Error;
use tracing::debug;

use crate::analysis::dominators::DominatorTree;
use crate::analysis::graph::DirectedGraph;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation<NodeId: Debug> {
    #[error("reachable node {0:?} has no immediate dominator")]
    Missing(NodeId),
    #[error("dominator chain of {0:?} does not reach the root")]
    Cycle(NodeId),
    #[error("{idom:?} is recorded as dominator of {node:?} but does not dominate it")]
    NotDominating { node: NodeId, idom: NodeId },
    #[error("{closer:?} dominates {node:?} and sits below its recorded dominator {idom:?}")]
    NotImmediate {
        node: NodeId,
        idom: NodeId,
        closer: NodeId,
    },
}

/// Checks totality, rootedness, dominance and immediacy of `tree` against
/// `graph`. An empty result means the tree is correct.
pub fn check_dominator_tree<G>(graph: &G, tree: &DominatorTree<G::Node>) -> Vec<Violation<G::Node>>
where
    G: DirectedGraph,
    G::Node: Debug,
{
    let root = tree.root();
    let reachable = reachable_without(graph, root, None);
    let mut violations = Vec::new();

    for node in graph.nodes().filter(|node| reachable.contains(*node) && *node != root) {
        if tree.immediate_dominator(node).is_none() {
            violations.push(Violation::Missing(node.clone()));
        }
    }

    for node in tree.preorder() {
        if tree.dominators_of(node).take(tree.len()).last() != Some(root) {
            violations.push(Violation::Cycle(node.clone()));
        }
    }

    // Remove each candidate dominator in turn and see what falls off.
    for candidate in tree.preorder().iter().skip(1) {
        let remaining = reachable_without(graph, root, Some(candidate));

        for (node, idom) in tree.iter() {
            if node == candidate {
                continue;
            }
            let dominated = !remaining.contains(node);

            if idom == candidate && !dominated {
                violations.push(Violation::NotDominating {
                    node: node.clone(),
                    idom: idom.clone(),
                });
            } else if dominated && idom != candidate && remaining.contains(idom) {
                violations.push(Violation::NotImmediate {
                    node: node.clone(),
                    idom: idom.clone(),
                    closer: candidate.clone(),
                });
            }
        }
    }

    debug!("dominator tree check found {} violation(s)", violations.len());
    violations
}

/// Nodes reachable from `root` without passing through `avoid`.
fn reachable_without<'g, G: DirectedGraph>(
    graph: &'g G,
    root: &'g G::Node,
    avoid: Option<&G::Node>,
) -> HashSet<&'g G::Node> {
    let mut visited = HashSet::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if Some(node) == avoid || !visited.insert(node) {
            continue;
        }
        stack.extend(graph.successors(node));
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::graph::AdjacencyGraph;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_correct_tree_has_no_violations() {
        let graph: AdjacencyGraph<u32> =
            [(1, 2), (1, 3), (2, 4), (3, 4), (4, 5), (5, 4)].into_iter().collect();
        let tree = DominatorTree::compute(&graph, 1).unwrap();

        assert_eq!(check_dominator_tree(&graph, &tree), vec![]);
    }

    #[test]
    fn test_detects_wrong_dominators() {
        // The tree is computed for a chain, then checked against a diamond
        // whose extra edge 1 -> 3 makes 2 no longer dominate 3.
        let chain: AdjacencyGraph<u32> = [(1, 2), (2, 3)].into_iter().collect();
        let tree = DominatorTree::compute(&chain, 1).unwrap();

        let diamond: AdjacencyGraph<u32> = [(1, 2), (2, 3), (1, 3)].into_iter().collect();
        let violations = check_dominator_tree(&diamond, &tree);
        assert_eq!(violations, vec![Violation::NotDominating { node: 3, idom: 2 }]);
        assert_eq!(
            violations[0].to_string(),
            "2 is recorded as dominator of 3 but does not dominate it"
        );
    }

    #[test]
    fn test_detects_missing_and_non_immediate() {
        // Computed on 1 -> 3, 1 -> 2 only; checked against 1 -> 2 -> 3, 2 -> 4
        let partial: AdjacencyGraph<u32> = [(1, 3), (1, 2)].into_iter().collect();
        let tree = DominatorTree::compute(&partial, 1).unwrap();

        let full: AdjacencyGraph<u32> = [(1, 2), (2, 3), (2, 4)].into_iter().collect();
        let violations = check_dominator_tree(&full, &tree);

        assert!(violations.contains(&Violation::Missing(4)));
        assert!(violations.contains(&Violation::NotImmediate {
            node: 3,
            idom: 1,
            closer: 2
        }));
    }

    #[test]
    fn test_detects_cycle() {
        let graph: AdjacencyGraph<u32> = [(1, 2), (2, 3)].into_iter().collect();
        // 2 and 3 name each other as immediate dominator
        let tree = DominatorTree::from_parts(vec![1, 2, 3], vec![0, 2, 1]);

        let violations = check_dominator_tree(&graph, &tree);
        assert!(violations.contains(&Violation::Cycle(2)));
        assert!(violations.contains(&Violation::Cycle(3)));
        assert!(!violations.contains(&Violation::Cycle(1)));
        assert_eq!(
            Violation::Cycle(2).to_string(),
            "dominator chain of 2 does not reach the root"
        );
    }

    #[test]
    fn test_random_graphs_check_clean() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let node_count = rng.gen_range(1..25u32);
            let edges: Vec<(u32, u32)> = (0..node_count * 2)
                .map(|_| (rng.gen_range(0..node_count), rng.gen_range(0..node_count)))
                .collect();
            let mut graph: AdjacencyGraph<u32> = AdjacencyGraph::new();
            graph.add_node(0);
            graph.extend(edges);

            let tree = DominatorTree::compute(&graph, 0).unwrap();
            assert_eq!(check_dominator_tree(&graph, &tree), vec![]);

            // Every reachable node reaches the root in at most len - 1 steps
            for node in tree.preorder() {
                assert!(tree.dominators_of(node).count() <= tree.len());
            }
        }
    }
}
