//! Bipartite layout and edge routing for the publication recommendation map.
//!
//! Raw publications and recommendations go through [`process_publications`]
//! (role classification and column placement), [`create_edges`] (endpoint
//! resolution, strength and curves) and [`bundle_edges`] (fan-out/fan-in
//! spreading). Every stage is pure and allocates fresh output.

mod bundle;
/// Category-level graph.
pub mod category;
mod classify;
/// Loading the raw exports.
pub mod dataset;
mod edges;
/// Records for the force canvas.
pub mod force;
mod layout;
mod nodes;
mod path;
/// Publication-level force graph.
pub mod publication_graph;
mod stats;
mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use bundle::{BUNDLED_CURVATURE, SPREAD_RANGE, bundle_edges, retarget_path, spread_offset};
pub use classify::identify_dual_roles;
pub use edges::{EDGE_CURVATURE, connection_strength, create_edges};
pub use layout::{
	ColumnPositions, GROUP_GAP, NODE_SPACING, TOP_MARGIN, calculate_node_positions, position_left,
	position_right,
};
pub use nodes::process_publications;
pub use path::{Curve, ParsePathError, Point};
pub use stats::{EdgeStatistics, calculate_edge_statistics};
pub use types::{
	Dimensions, Edge, NetworkGraph, NodeGroup, NodeType, ProcessedNode, Publication, Recommendation,
	Side, SubscriberCount,
};

/// Run the whole pipeline: place nodes, route edges, bundle them.
pub fn build_graph(
	publications: &[Publication],
	recommendations: &[Recommendation],
	dims: Dimensions,
) -> NetworkGraph {
	let nodes = process_publications(publications, recommendations, dims);
	let edges = bundle_edges(&create_edges(recommendations, &nodes));
	NetworkGraph { nodes, edges }
}
