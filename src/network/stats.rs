use std::collections::HashMap;

use serde::Serialize;

use super::types::Edge;

/// Summary of a bundled edge set for the statistics panel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStatistics {
	/// Number of edges.
	pub total_edges: usize,
	/// `NaN` for an empty edge set.
	pub average_strength: f64,
	/// Highest in-degree plus out-degree of any node id.
	pub max_connections_per_node: usize,
	/// Node ids with more than one connection.
	pub nodes_with_multiple_connections: usize,
}

/// Summarise an edge set. A node's connection count is its out-degree plus its
/// in-degree, so a self-loop counts twice.
pub fn calculate_edge_statistics(edges: &[Edge]) -> EdgeStatistics {
	let total_edges = edges.len();
	let average_strength = edges.iter().map(|edge| edge.strength).sum::<f64>() / total_edges as f64;

	let mut connections: HashMap<&str, usize> = HashMap::new();
	for edge in edges {
		*connections.entry(edge.source.id.as_str()).or_default() += 1;
		*connections.entry(edge.target.id.as_str()).or_default() += 1;
	}

	EdgeStatistics {
		total_edges,
		average_strength,
		max_connections_per_node: connections.values().copied().max().unwrap_or(0),
		nodes_with_multiple_connections: connections.values().filter(|&&count| count > 1).count(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::edges::create_edges;
	use crate::network::fixtures::{hub_publications, hub_recommendations, publications, recommendations};
	use crate::network::nodes::process_publications;
	use crate::network::types::{Dimensions, Recommendation};

	fn edges(recs: &[Recommendation]) -> Vec<Edge> {
		let nodes = process_publications(&publications(), recs, Dimensions::default());
		create_edges(recs, &nodes)
	}

	#[test]
	fn counts_and_mean() {
		let edges = edges(&recommendations());
		let stats = calculate_edge_statistics(&edges);
		let manual = edges.iter().map(|edge| edge.strength).sum::<f64>() / 3.0;

		assert_eq!(stats.total_edges, 3);
		assert!((stats.average_strength - manual).abs() < 1e-5);
		// pub1 has two outgoing, pub3 two incoming
		assert_eq!(stats.max_connections_per_node, 2);
		assert_eq!(stats.nodes_with_multiple_connections, 2);
	}

	#[test]
	fn hub_that_sends_and_receives_twice() {
		let pubs = hub_publications();
		let recs = hub_recommendations();
		let nodes = process_publications(&pubs, &recs, Dimensions::default());
		let edges = create_edges(&recs, &nodes);
		let stats = calculate_edge_statistics(&edges);

		let strengths: Vec<f64> = edges.iter().map(|edge| edge.strength).collect();
		let manual = strengths.iter().sum::<f64>() / 3.0;
		assert_eq!(stats.total_edges, 3);
		assert!((stats.average_strength - manual).abs() < 1e-5);
		assert!((stats.average_strength - 2.3 / 3.0).abs() < 1e-9);
		// hub: two out (leaf, itself) and two in (lead, itself)
		assert_eq!(stats.max_connections_per_node, 4);
		assert!(stats.nodes_with_multiple_connections >= 1);
		assert_eq!(stats.nodes_with_multiple_connections, 1);
	}

	#[test]
	fn self_loop_counts_twice() {
		let edges = edges(&[Recommendation::new("pub4", "pub4")]);
		let stats = calculate_edge_statistics(&edges);
		assert_eq!(stats.max_connections_per_node, 2);
		assert_eq!(stats.nodes_with_multiple_connections, 1);
	}

	#[test]
	fn empty_set_has_nan_mean() {
		let stats = calculate_edge_statistics(&[]);
		assert_eq!(stats.total_edges, 0);
		assert!(stats.average_strength.is_nan());
		assert_eq!(stats.max_connections_per_node, 0);
		assert_eq!(stats.nodes_with_multiple_connections, 0);
	}
}
