//! dominator-analyzer computes dominator trees of directed graphs.
//! The functions include
//! 1. immediate dominators by the simple Lengauer–Tarjan algorithm
//! 2. root selection for datasets that do not name a root
//! 3. edge-list parsing and `node: dominator` output
//! 4. brute-force verification of a computed tree

pub mod analysis;
pub mod checker;
pub mod config;
pub mod dataset;

pub use analysis::dominators::{compute_dominator_tree, DominatorError, DominatorTree};
pub use analysis::graph::{AdjacencyGraph, DirectedGraph};
pub use analysis::root::{select_root, RootStrategy};
