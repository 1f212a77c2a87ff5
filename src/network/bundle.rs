//! Fan-out / fan-in spreading for edges that share an endpoint.
//!
//! Edges leaving the same node are re-routed with a stronger curve and their
//! start points fanned across [`SPREAD_RANGE`] pixels. Edges arriving at the
//! same node then get their end points fanned the same way. The second pass
//! works on the output of the first.

use std::collections::HashMap;

use super::path::{Curve, Point};
use super::types::Edge;

/// Vertical extent edges are fanned across, centred on the node.
pub const SPREAD_RANGE: f64 = 40.0;
/// Curvature used for re-routed fan-out edges.
pub const BUNDLED_CURVATURE: f64 = 0.3;

/// Offset of the `index`-th of `total` edges sharing an endpoint.
pub fn spread_offset(index: usize, total: usize) -> f64 {
	let step = if total > 1 {
		SPREAD_RANGE / (total - 1) as f64
	} else {
		0.0
	};
	index as f64 * step - SPREAD_RANGE / 2.0
}

/// Position of each edge within its group, plus the group size.
fn group_slots<'a>(edges: &'a [Edge], key: impl Fn(&'a Edge) -> &'a str) -> Vec<(usize, usize)> {
	let mut totals: HashMap<&str, usize> = HashMap::new();
	let slots: Vec<(&str, usize)> = edges
		.iter()
		.map(|edge| {
			let id = key(edge);
			let seen = totals.entry(id).or_default();
			*seen += 1;
			(id, *seen - 1)
		})
		.collect();
	slots
		.into_iter()
		.map(|(id, index)| (index, totals[id]))
		.collect()
}

/// Spread edges that share a source or target. Same length and order as the
/// input; only `path` changes.
pub fn bundle_edges(edges: &[Edge]) -> Vec<Edge> {
	let by_source = group_slots(edges, |edge| edge.source.id.as_str());
	let by_target = group_slots(edges, |edge| edge.target.id.as_str());

	edges
		.iter()
		.zip(by_source.into_iter().zip(by_target))
		.map(|(edge, ((source_index, source_total), (target_index, target_total)))| {
			let mut path = edge.path;
			if source_total > 1 {
				path = fan_out(edge, spread_offset(source_index, source_total));
			}
			if target_total > 1 {
				path = path.shift_end(spread_offset(target_index, target_total));
			}
			Edge { path, ..edge.clone() }
		})
		.collect()
}

/// Re-route `edge` from its node centres with the start point moved by `offset`.
fn fan_out(edge: &Edge, offset: f64) -> Curve {
	let start = Point::new(edge.source.x, edge.source.y + offset);
	let end = Point::new(edge.target.x, edge.target.y);
	Curve::horizontal(start, end, BUNDLED_CURVATURE)
}

/// Fan-in on a serialized path: move the end point by the spread offset and the
/// second control point by half of it. Paths that are not a single cubic come
/// back unchanged.
pub fn retarget_path(path: &str, index: usize, total: usize) -> String {
	match path.parse::<Curve>() {
		Ok(curve) => curve.shift_end(spread_offset(index, total)).to_string(),
		Err(_) => path.to_owned(),
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::network::edges::create_edges;
	use crate::network::fixtures::{hub_publications, hub_recommendations, publications, recommendations};
	use crate::network::nodes::process_publications;
	use crate::network::types::{Dimensions, Recommendation, Side};

	fn edges(recs: &[Recommendation]) -> Vec<Edge> {
		let nodes = process_publications(&publications(), recs, Dimensions::default());
		create_edges(recs, &nodes)
	}

	#[test]
	fn offsets_span_the_spread_range() {
		assert_eq!(spread_offset(0, 3), -20.0);
		assert_eq!(spread_offset(1, 3), 0.0);
		assert_eq!(spread_offset(2, 3), 20.0);
		assert_eq!(spread_offset(0, 1), -20.0);
	}

	#[test]
	fn preserves_length_order_and_metadata() {
		let edges = edges(&recommendations());
		let bundled = bundle_edges(&edges);
		assert_eq!(bundled.len(), edges.len());
		for (before, after) in edges.iter().zip(&bundled) {
			assert_eq!(before.id, after.id);
			assert!(Arc::ptr_eq(&before.source, &after.source));
			assert!(Arc::ptr_eq(&before.target, &after.target));
			assert_eq!(before.strength, after.strength);
		}
	}

	#[test]
	fn fan_out_and_fan_in_compose() {
		// pub1 -> pub3, pub1 -> pub4, pub2 -> pub3
		let edges = edges(&recommendations());
		let bundled = bundle_edges(&edges);
		let paths: Vec<String> = bundled.iter().map(|edge| edge.path.to_string()).collect();
		assert_eq!(
			paths,
			[
				// first of two out of pub1, first of two into pub3
				"M 200 60 C 320 60, 480 105, 600 95",
				// second of two out of pub1, only edge into pub4
				"M 200 100 C 320 100, 480 80, 600 80",
				// only edge out of pub2, second of two into pub3
				"M 200 105 C 260 105, 540 125, 600 135",
			]
		);
	}

	#[test]
	fn dual_hub_fans_out_and_in_from_its_right_copy() {
		let pubs = hub_publications();
		let recs = hub_recommendations();
		let nodes = process_publications(&pubs, &recs, Dimensions::default());
		let edges = create_edges(&recs, &nodes);
		assert!(edges.iter().all(|edge| edge.source.id != "hub" || edge.source.side == Side::Right));

		let paths: Vec<String> = bundle_edges(&edges)
			.iter()
			.map(|edge| edge.path.to_string())
			.collect();
		assert_eq!(
			paths,
			[
				// only edge out of lead, first of two into hub
				"M 200 80 C 260 80, 540 70, 600 60",
				// first of two out of hub, only edge into leaf
				"M 600 60 C 600 60, 600 115, 600 115",
				// second out of hub and second into hub
				"M 600 100 C 600 100, 600 90, 600 100",
			]
		);
	}

	#[test]
	fn lone_edges_are_untouched() {
		let edges = edges(&[Recommendation::new("pub1", "pub3")]);
		let bundled = bundle_edges(&edges);
		assert_eq!(bundled[0].path, edges[0].path);
	}

	#[test]
	fn self_loop_passes_through() {
		let recs = [Recommendation::new("pub4", "pub4"), Recommendation::new("pub1", "pub4")];
		let edges = edges(&recs);
		assert_eq!(edges.len(), 2);
		assert!(Arc::ptr_eq(&edges[0].source, &edges[0].target));
		assert_eq!(bundle_edges(&edges).len(), 2);
	}

	#[test]
	fn retarget_path_matches_structured_bundling() {
		let out = retarget_path("M 200 80 C 260 80, 540 115, 600 115", 0, 2);
		assert_eq!(out, "M 200 80 C 260 80, 540 105, 600 95");
	}

	#[test]
	fn retarget_path_leaves_malformed_paths_alone() {
		assert_eq!(retarget_path("M 0 0 L 5 5", 0, 2), "M 0 0 L 5 5");
		assert_eq!(retarget_path("", 1, 3), "");
	}

	#[test]
	fn empty_edge_set() {
		assert!(bundle_edges(&[]).is_empty());
	}
}
