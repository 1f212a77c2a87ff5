//! View components. Each takes already-computed graph data.

pub mod bipartite_graph;
pub mod force_graph;
