use std::collections::HashMap;
use std::hash::Hash;

use crate::analysis::graph::DirectedGraph;

/// Preorder numbering of the nodes reachable from the root.
///
/// All tables except `index` are indexed by DFS number; the root is 0.
#[derive(Debug)]
pub(super) struct DfsNumbering<NodeId> {
    /// Node at each DFS number
    pub vertex: Vec<NodeId>,
    /// DFS number of each reached node
    pub index: HashMap<NodeId, usize>,
    /// DFS-tree parent. The root points at itself.
    pub parent: Vec<usize>,
    /// Sources of every traversed edge into each node, tree edges or not
    pub predecessors: Vec<Vec<usize>>,
}

impl<NodeId> DfsNumbering<NodeId>
where
    NodeId: Eq + Hash + Clone,
{
    /// Walks the graph from `root` with an explicit stack of
    /// `(dfs number, next successor position)` frames.
    pub fn compute<G: DirectedGraph<Node = NodeId>>(graph: &G, root: NodeId) -> Self {
        let capacity = graph.node_count();
        let mut numbering = Self {
            vertex: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            predecessors: Vec::with_capacity(capacity),
        };

        let root = numbering.visit(root, 0);
        let mut stack = vec![(root, 0usize)];

        while let Some(&(v, next)) = stack.last() {
            let Some(w) = graph.successors(&numbering.vertex[v]).get(next) else {
                stack.pop();
                continue;
            };
            let top = stack.len() - 1;
            stack[top].1 += 1;

            let w = match numbering.index.get(w) {
                Some(&w) => w,
                None => {
                    let w = numbering.visit(w.clone(), v);
                    // descend before looking at the rest of v's successors
                    stack.push((w, 0));
                    w
                }
            };
            numbering.predecessors[w].push(v);
        }

        numbering
    }

    fn visit(&mut self, node: NodeId, parent: usize) -> usize {
        let number = self.vertex.len();
        self.index.insert(node.clone(), number);
        self.vertex.push(node);
        self.parent.push(parent);
        self.predecessors.push(Vec::new());
        number
    }

    pub fn len(&self) -> usize {
        self.vertex.len()
    }
}
