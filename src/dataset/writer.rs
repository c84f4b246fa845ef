use std::fmt::Display;
use std::hash::Hash;
use std::io::{self, Write};

use crate::analysis::dominators::DominatorTree;

/// Writes `node: dominator` for every reachable node but the root, in DFS preorder.
pub fn write_dominator_tree<W, NodeId>(writer: &mut W, tree: &DominatorTree<NodeId>) -> io::Result<()>
where
    W: Write,
    NodeId: Display + Eq + Hash + Clone,
{
    for (node, idom) in tree.iter() {
        writeln!(writer, "{node}: {idom}")?;
    }
    writer.flush()
}

pub fn render_dominator_tree<NodeId>(tree: &DominatorTree<NodeId>) -> String
where
    NodeId: Display + Eq + Hash + Clone,
{
    tree.iter()
        .map(|(node, idom)| format!("{node}: {idom}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::graph::AdjacencyGraph;

    #[test]
    fn test_records_in_preorder() {
        let graph: AdjacencyGraph<u64> = [(1, 2), (1, 3), (2, 4), (3, 4)].into_iter().collect();
        let tree = DominatorTree::compute(&graph, 1).unwrap();

        let mut out = Vec::new();
        write_dominator_tree(&mut out, &tree).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2: 1\n4: 1\n3: 1\n");
        assert_eq!(render_dominator_tree(&tree), "2: 1\n4: 1\n3: 1\n");
    }

    #[test]
    fn test_root_only_writes_nothing() {
        let graph: AdjacencyGraph<u64> = [(1, 1)].into_iter().collect();
        let tree = DominatorTree::compute(&graph, 1).unwrap();
        assert_eq!(render_dominator_tree(&tree), "");
    }
}
