//! Link-eval forest with path compression.
//!
//! Nodes are DFS numbers. The forest only ever grows by [`LinkEvalForest::link`];
//! [`LinkEvalForest::eval`] answers "which node on my ancestor chain, below the
//! forest root, has the smallest semidominator" and compresses the chain while
//! doing so.

/// Ancestor and label tables of the virtual forest.
#[derive(Debug, Clone)]
pub struct LinkEvalForest {
    ancestor: Vec<Option<usize>>,
    label: Vec<usize>,
    /// Scratch space reused by `compress`
    chain: Vec<usize>,
}

impl LinkEvalForest {
    /// Creates `len` singleton trees, each node labelled with itself.
    pub fn new(len: usize) -> Self {
        Self {
            ancestor: vec![None; len],
            label: (0..len).collect(),
            chain: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_empty()
    }

    pub fn ancestor(&self, node: usize) -> Option<usize> {
        self.ancestor[node]
    }

    pub fn label(&self, node: usize) -> usize {
        self.label[node]
    }

    /// Hangs `child` under `parent`. Each node is linked at most once.
    pub fn link(&mut self, parent: usize, child: usize) {
        debug_assert!(
            self.ancestor[child].is_none(),
            "node {child} is already linked"
        );
        self.ancestor[child] = Some(parent);
    }

    /// Shortcuts every node on `node`'s chain to the forest root's direct child,
    /// pulling smaller-semidominator labels down as it goes.
    ///
    /// Equivalent to the textbook recursion, but the chain is collected first and
    /// then rewritten from the top down, so chain length is not bounded by the
    /// call stack. Calling it again on the same node changes nothing.
    pub fn compress(&mut self, node: usize, semi: &[usize]) {
        let mut chain = std::mem::take(&mut self.chain);
        chain.clear();

        // Only nodes whose ancestor still has an ancestor get rewritten.
        let mut current = node;
        while let Some(ancestor) = self.ancestor[current] {
            if self.ancestor[ancestor].is_none() {
                break;
            }
            chain.push(current);
            current = ancestor;
        }

        for &v in chain.iter().rev() {
            let Some(ancestor) = self.ancestor[v] else {
                continue;
            };
            if semi[self.label[ancestor]] < semi[self.label[v]] {
                self.label[v] = self.label[ancestor];
            }
            self.ancestor[v] = self.ancestor[ancestor];
        }

        self.chain = chain;
    }

    /// Returns `node` itself if it is a forest root, otherwise the node with the
    /// minimum semidominator on its chain (excluding the root of its tree).
    pub fn eval(&mut self, node: usize, semi: &[usize]) -> usize {
        if self.ancestor[node].is_none() {
            return node;
        }
        self.compress(node, semi);
        self.label[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Links `0 <- 1 <- 2 <- ... <- len-1` as a single path.
    fn path(len: usize) -> LinkEvalForest {
        let mut forest = LinkEvalForest::new(len);
        for child in (1..len).rev() {
            forest.link(child - 1, child);
        }
        forest
    }

    #[test]
    fn test_eval_of_forest_root_is_itself() {
        let mut forest = LinkEvalForest::new(3);
        let semi = [0, 1, 2];
        assert_eq!(forest.eval(2, &semi), 2);
        assert_eq!(forest.ancestor(2), None);
        assert_eq!(forest.len(), 3);
    }

    #[test]
    fn test_eval_finds_minimum_semi_below_root() {
        let mut forest = path(5);
        // node 0 is the forest root and is never reported
        let semi = [0, 4, 1, 3, 2];
        assert_eq!(forest.eval(4, &semi), 2);
        assert_eq!(forest.eval(3, &semi), 2);
        assert_eq!(forest.eval(1, &semi), 1);
    }

    #[test]
    fn test_compress_shortcuts_to_root_child() {
        let mut forest = path(5);
        let semi = [0, 1, 2, 3, 4];
        forest.compress(4, &semi);

        assert_eq!(forest.ancestor(4), Some(0));
        assert_eq!(forest.ancestor(3), Some(0));
        assert_eq!(forest.ancestor(2), Some(0));
        assert_eq!(forest.ancestor(1), Some(0));
        assert_eq!(forest.label(4), 1);
        assert_eq!(forest.label(2), 1);
    }

    #[test]
    fn test_compress_is_idempotent() {
        let mut forest = path(6);
        let semi = [0, 3, 5, 1, 4, 2];

        forest.compress(5, &semi);
        let once: Vec<_> = (0..6).map(|v| (forest.ancestor(v), forest.label(v))).collect();
        forest.compress(5, &semi);
        let twice: Vec<_> = (0..6).map(|v| (forest.ancestor(v), forest.label(v))).collect();

        assert_eq!(once, twice);
        assert_eq!(forest.label(5), 3);
    }

    #[test]
    fn test_compress_long_chain() {
        let len = 100_000;
        let mut forest = path(len);
        let semi: Vec<usize> = (0..len).rev().collect();
        // smallest semi below the root sits right next to the leaf
        assert_eq!(forest.eval(len - 1, &semi), len - 1);
        assert_eq!(forest.ancestor(len - 1), Some(0));
    }
}
