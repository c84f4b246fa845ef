//! Edge-list datasets in, `node: dominator` records out.
//! 1. `parser` turns `from,to` lines into an [`AdjacencyGraph`](crate::analysis::graph::AdjacencyGraph).
//! 2. `writer` renders a dominator tree one record per line.

pub mod parser;
pub mod writer;
pub use parser::{parse_edge_list, read_edge_list, DatasetError};
pub use writer::{render_dominator_tree, write_dominator_tree};
