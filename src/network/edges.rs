use std::collections::HashMap;
use std::sync::Arc;

use super::path::{Curve, Point};
use super::types::{Edge, NodeType, ProcessedNode, Recommendation, SubscriberCount};

/// Control-point pull for a freshly built edge, as a fraction of the column gap.
pub const EDGE_CURVATURE: f64 = 0.15;

/// Resolve recommendations against placed nodes and route one edge per pair.
///
/// Recommendations with an endpoint that has no node are skipped. Edge ids
/// keep the index into `recommendations`, so skipped entries leave gaps. When
/// two nodes share an id, the later one in `nodes` is used.
pub fn create_edges(recommendations: &[Recommendation], nodes: &[Arc<ProcessedNode>]) -> Vec<Edge> {
	let by_id: HashMap<&str, &Arc<ProcessedNode>> =
		nodes.iter().map(|node| (node.id.as_str(), node)).collect();

	recommendations
		.iter()
		.enumerate()
		.filter_map(|(index, rec)| {
			let source = by_id.get(rec.recommender_id.as_str())?;
			let target = by_id.get(rec.recommended_id.as_str())?;
			Some(Edge {
				id: format!("edge-{index}-{}-{}", source.id, target.id),
				path: curved_path(source, target),
				strength: connection_strength(source, target),
				source: Arc::clone(source),
				target: Arc::clone(target),
			})
		})
		.collect()
}

/// Rendering weight of an edge in `[0.1, 1.0]`.
pub fn connection_strength(source: &ProcessedNode, target: &ProcessedNode) -> f64 {
	let mut strength: f64 = 0.5;

	match source.subscriber_count {
		SubscriberCount::Known(count) if count > 100_000.0 => strength += 0.3,
		SubscriberCount::Known(count) if count > 50_000.0 => strength += 0.2,
		SubscriberCount::Known(count) if count > 10_000.0 => strength += 0.1,
		SubscriberCount::Known(_) => {}
		SubscriberCount::Unknown => {
			if matches!(source.node_type, NodeType::Bestseller | NodeType::Dual) {
				strength += 0.2;
			}
		}
	}

	if source.node_type == NodeType::Dual {
		strength += 0.1;
	}
	if target.node_type == NodeType::Dual {
		strength += 0.1;
	}

	strength.clamp(0.1, 1.0)
}

/// Gentle horizontal-tangent curve from `source` to `target`.
pub fn curved_path(source: &ProcessedNode, target: &ProcessedNode) -> Curve {
	Curve::horizontal(
		Point::new(source.x, source.y),
		Point::new(target.x, target.y),
		EDGE_CURVATURE,
	)
}
