//! Input records for the force-directed canvas.
//!
//! The physics runs in the `force_graph` crate; this module only decides what
//! each node and link looks like.

use serde::Serialize;

use super::types::{Publication, Recommendation};

/// Bestseller nodes.
pub const BESTSELLER_COLOR: &str = "#ff6b35";
/// Other publications when no category colour applies.
pub const PUBLICATION_COLOR: &str = "#4ecdc4";
/// Links.
pub const LINK_COLOR: &str = "#999999";
/// Categories missing from the palette.
pub const DEFAULT_CATEGORY_COLOR: &str = "#95a5a6";

const CATEGORY_COLORS: &[(&str, &str)] = &[
	("technology", "#3498db"),
	("business", "#2ecc71"),
	("politics", "#e74c3c"),
	("culture", "#9b59b6"),
	("science", "#f39c12"),
	("health", "#1abc9c"),
	("finance", "#34495e"),
	("education", "#e67e22"),
	("entertainment", "#e91e63"),
	("sports", "#795548"),
];

/// A node as the canvas draws it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphNode {
	/// Referenced by [`GraphLink`] endpoints.
	pub id: String,
	/// Text drawn next to the node.
	pub label: Option<String>,
	/// CSS colour.
	pub color: String,
	/// Relative node size; 1 is the smallest drawn.
	#[serde(rename = "val")]
	pub size: f64,
}

/// A directed link between two [`GraphNode`] ids.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphLink {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// CSS colour.
	pub color: String,
}

/// Everything the force canvas needs.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphData {
	/// Nodes.
	pub nodes: Vec<GraphNode>,
	/// Links; ones naming a missing node are skipped when drawn.
	pub links: Vec<GraphLink>,
}

/// Square-root size scale so the largest newsletters don't swamp the canvas.
pub fn node_size(publication: &Publication) -> f64 {
	let count = publication.subscriber_count.known().unwrap_or(0.0);
	(count / 1000.0).sqrt().max(1.0)
}

/// Palette colour for a category, case-insensitive.
pub fn category_color(category: &str) -> &'static str {
	let category = category.to_lowercase();
	CATEGORY_COLORS
		.iter()
		.find(|(name, _)| *name == category)
		.map_or(DEFAULT_CATEGORY_COLOR, |&(_, color)| color)
}

/// Node for one publication, orange for bestsellers.
pub fn graph_node(publication: &Publication) -> GraphNode {
	GraphNode {
		id: publication.id.clone(),
		label: Some(publication.name.clone()),
		color: if publication.is_bestseller {
			BESTSELLER_COLOR
		} else {
			PUBLICATION_COLOR
		}
		.to_owned(),
		size: node_size(publication),
	}
}

/// Like [`graph_node`], but non-bestsellers take their category colour.
pub fn graph_node_with_category_color(publication: &Publication) -> GraphNode {
	let mut node = graph_node(publication);
	if !publication.is_bestseller {
		node.color = category_color(&publication.category).to_owned();
	}
	node
}

/// Link for one recommendation.
pub fn graph_link(recommendation: &Recommendation) -> GraphLink {
	GraphLink {
		source: recommendation.recommender_id.clone(),
		target: recommendation.recommended_id.clone(),
		color: LINK_COLOR.to_owned(),
	}
}

/// Publications and recommendations with category colouring.
pub fn force_graph_data(publications: &[Publication], recommendations: &[Recommendation]) -> GraphData {
	GraphData {
		nodes: publications.iter().map(graph_node_with_category_color).collect(),
		links: recommendations.iter().map(graph_link).collect(),
	}
}
