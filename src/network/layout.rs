//! Column placement for the bipartite layout.
//!
//! Nodes are stacked from a fixed top margin with a fixed step, so large
//! datasets run past the bottom of the canvas. [`calculate_node_positions`] is
//! the proportional alternative for callers that need everything on screen.
//! Names are ordered with a root-locale `icu_collator`.

use std::cmp::Ordering;
use std::collections::HashSet;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use serde::Serialize;

use super::types::{Dimensions, NodeGroup, NodeType, ProcessedNode, Publication, Side};

/// y of the first row in each column.
pub const TOP_MARGIN: f64 = 80.0;
/// Row step.
pub const NODE_SPACING: f64 = 25.0;
/// Extra space between the dual-role and recommendation-only blocks.
pub const GROUP_GAP: f64 = 10.0;

thread_local! {
	static COLLATOR: Option<CollatorBorrowed<'static>> =
		Collator::try_new(Default::default(), CollatorOptions::default()).ok();
}

/// Root-locale collation of publication names: accents and case only break
/// ties, lowercase first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
	COLLATOR.with(|collator| match collator {
		Some(collator) => collator.compare(a, b),
		None => a
			.to_lowercase()
			.cmp(&b.to_lowercase())
			.then_with(|| b.cmp(a)),
	})
}

/// Subscriber count descending, unknown counts last and ordered by name.
fn by_subscribers(a: &&Publication, b: &&Publication) -> Ordering {
	a.subscriber_count
		.cmp_descending(b.subscriber_count)
		.then_with(|| match (a.subscriber_count.known(), b.subscriber_count.known()) {
			(None, None) => compare_names(&a.name, &b.name),
			_ => Ordering::Equal,
		})
}

fn by_name(a: &&Publication, b: &&Publication) -> Ordering {
	compare_names(&a.name, &b.name)
}

/// Place bestsellers in the left column.
pub fn position_left(
	bestsellers: &[&Publication],
	dual_ids: &HashSet<String>,
	dims: Dimensions,
) -> Vec<ProcessedNode> {
	let mut sorted = bestsellers.to_vec();
	sorted.sort_by(by_subscribers);

	let x = dims.column_x(Side::Left);
	sorted
		.into_iter()
		.enumerate()
		.map(|(i, publication)| {
			let (node_type, group) = if dual_ids.contains(&publication.id) {
				(NodeType::Dual, NodeGroup::DualRole)
			} else {
				(NodeType::Bestseller, NodeGroup::Bestseller)
			};
			let y = TOP_MARGIN + i as f64 * NODE_SPACING;
			ProcessedNode::place(publication, (x, y), node_type, Side::Left, group)
		})
		.collect()
}

/// Place recommended publications in the right column.
///
/// `dual_candidates` may be any superset of the dual-role publications; only
/// members of `dual_ids` are kept from it. `recommended_only` entries that are
/// dual-role are ignored, so the two inputs may overlap.
pub fn position_right(
	dual_candidates: &[&Publication],
	recommended_only: &[&Publication],
	dual_ids: &HashSet<String>,
	dims: Dimensions,
) -> Vec<ProcessedNode> {
	let mut dual: Vec<&Publication> = dual_candidates
		.iter()
		.copied()
		.filter(|publication| dual_ids.contains(&publication.id))
		.collect();
	let mut only: Vec<&Publication> = recommended_only
		.iter()
		.copied()
		.filter(|publication| !dual_ids.contains(&publication.id))
		.collect();
	dual.sort_by(by_subscribers);
	only.sort_by(by_name);

	let x = dims.column_x(Side::Right);
	let mut y = TOP_MARGIN;
	let mut nodes = Vec::with_capacity(dual.len() + only.len());

	for publication in &dual {
		nodes.push(ProcessedNode::place(
			publication,
			(x, y),
			NodeType::Dual,
			Side::Right,
			NodeGroup::DualRole,
		));
		y += NODE_SPACING;
	}

	if !dual.is_empty() && !only.is_empty() {
		y += GROUP_GAP;
	}

	for publication in &only {
		nodes.push(ProcessedNode::place(
			publication,
			(x, y),
			NodeType::Recommendation,
			Side::Right,
			NodeGroup::RecommendationOnly,
		));
		y += NODE_SPACING;
	}

	nodes
}

/// Evenly spread positions for one column.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPositions {
	/// Column x.
	pub x: f64,
	/// One y per node, top to bottom.
	pub y_positions: Vec<f64>,
}

/// Spread `count` nodes between 10% and 90% of the height; a lone node is centred.
pub fn calculate_node_positions(count: usize, dims: Dimensions, side: Side) -> ColumnPositions {
	let x = dims.column_x(side);
	let top = dims.height * 0.1;
	let available = dims.height - top - dims.height * 0.1;

	let y_positions = match count {
		0 => Vec::new(),
		1 => vec![dims.height / 2.0],
		n => (0..n)
			.map(|i| top + (i as f64 / (n - 1) as f64) * available)
			.collect(),
	};

	ColumnPositions { x, y_positions }
}
