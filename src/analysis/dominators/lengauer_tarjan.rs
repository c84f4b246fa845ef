use tracing::debug;

use super::forest::LinkEvalForest;

/// Immediate dominators of a DFS-numbered graph, by DFS number.
///
/// `parent` and `predecessors` come from the DFS numbering, with node 0 as
/// the root. The result maps every node to its immediate dominator; the root
/// maps to itself.
pub(super) fn immediate_dominators(parent: &[usize], predecessors: &[Vec<usize>]) -> Vec<usize> {
    let len = parent.len();
    let mut semi: Vec<usize> = (0..len).collect();
    let mut dom = vec![0; len];
    let mut bucket: Vec<Vec<usize>> = vec![Vec::new(); len];
    let mut forest = LinkEvalForest::new(len);

    // Semidominators, bottom up. Dominators are resolved lazily per bucket.
    for w in (1..len).rev() {
        for &v in &predecessors[w] {
            let u = forest.eval(v, &semi);
            if semi[u] < semi[w] {
                semi[w] = semi[u];
            }
        }
        bucket[semi[w]].push(w);

        let p = parent[w];
        forest.link(p, w);

        for v in std::mem::take(&mut bucket[p]) {
            let u = forest.eval(v, &semi);
            dom[v] = if semi[u] < semi[v] { u } else { p };
        }
    }
    debug!("semidominators computed for {} nodes", len);

    // dom[dom[w]] is final by the time w is reached.
    for w in 1..len {
        if dom[w] != semi[w] {
            dom[w] = dom[dom[w]];
        }
    }
    debug!("immediate dominators finalized for {} nodes", len);

    dom
}
