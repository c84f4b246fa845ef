pub mod dominators;
pub mod graph;
pub mod root;
