use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use super::path::Curve;

/// Subscriber total for a publication, when one could be joined.
///
/// Any JSON number is accepted; `null` or a missing field is [`Unknown`](Self::Unknown).
/// Whole counts serialize back without a fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Option<f64>")]
pub enum SubscriberCount {
	/// Authoritative count.
	Known(f64),
	/// No count was available for this publication.
	#[default]
	Unknown,
}

impl SubscriberCount {
	/// The count, if known.
	pub fn known(self) -> Option<f64> {
		match self {
			Self::Known(count) => Some(count),
			Self::Unknown => None,
		}
	}

	/// Ordering used for stacking: known counts descending, unknown last.
	/// Two unknown counts compare equal; callers break that tie by name.
	pub fn cmp_descending(self, other: Self) -> Ordering {
		match (self, other) {
			(Self::Known(a), Self::Known(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
			(Self::Known(_), Self::Unknown) => Ordering::Less,
			(Self::Unknown, Self::Known(_)) => Ordering::Greater,
			(Self::Unknown, Self::Unknown) => Ordering::Equal,
		}
	}
}

impl From<Option<f64>> for SubscriberCount {
	fn from(value: Option<f64>) -> Self {
		value.map_or(Self::Unknown, Self::Known)
	}
}

impl From<SubscriberCount> for Option<f64> {
	fn from(value: SubscriberCount) -> Self {
		value.known()
	}
}

/// Largest magnitude at which every whole `f64` is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Serialize for SubscriberCount {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match *self {
			Self::Known(count) if count.fract() == 0.0 && count.abs() <= MAX_SAFE_INTEGER => {
				serializer.serialize_i64(count as i64)
			}
			Self::Known(count) => serializer.serialize_f64(count),
			Self::Unknown => serializer.serialize_none(),
		}
	}
}

/// A newsletter publication as supplied by the data loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Publication {
	/// Publication URL, unique per publication.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Topic category, e.g. "Technology".
	pub category: String,
	/// Missing in the input means unknown.
	#[serde(default)]
	pub subscriber_count: SubscriberCount,
	/// Carries the Substack bestseller badge.
	pub is_bestseller: bool,
}

/// A directed "recommender recommends recommended" relationship.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
	/// Id of the publication making the recommendation.
	pub recommender_id: String,
	/// Id of the publication being recommended.
	pub recommended_id: String,
}

impl Recommendation {
	/// Recommendation from `recommender_id` to `recommended_id`.
	pub fn new(recommender_id: impl Into<String>, recommended_id: impl Into<String>) -> Self {
		Self {
			recommender_id: recommender_id.into(),
			recommended_id: recommended_id.into(),
		}
	}
}

/// What a placed node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
	/// Bestseller that nobody in the data recommends.
	Bestseller,
	/// Recommended publication that is not a bestseller.
	Recommendation,
	/// Bestseller that is also recommended. Placed in both columns.
	Dual,
}

/// Column of the bipartite layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	/// Bestsellers.
	Left,
	/// Recommended publications.
	Right,
}

impl Side {
	/// Horizontal anchor of the column as a fraction of the canvas width.
	pub fn x_fraction(self) -> f64 {
		match self {
			Self::Left => 0.25,
			Self::Right => 0.75,
		}
	}
}

/// Styling group of a placed node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeGroup {
	/// Left-column bestseller.
	Bestseller,
	/// Recommended, never a bestseller.
	RecommendationOnly,
	/// Either copy of a dual-role publication.
	DualRole,
}

impl NodeGroup {
	/// Wire name, also used as a CSS class.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bestseller => "bestseller",
			Self::RecommendationOnly => "recommendation-only",
			Self::DualRole => "dual-role",
		}
	}
}

/// A publication placed on one side of the bipartite layout.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedNode {
	/// Id of the source publication. Shared by both copies of a dual node.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Topic category.
	pub category: String,
	/// Audience size copied from the publication.
	#[serde(rename = "subscriber_count")]
	pub subscriber_count: SubscriberCount,
	/// Column x.
	pub x: f64,
	/// Row y.
	pub y: f64,
	/// Role in the recommendation data.
	pub node_type: NodeType,
	/// Column the node sits in.
	pub side: Side,
	/// Styling group.
	pub group: NodeGroup,
}

impl ProcessedNode {
	pub(crate) fn place(
		publication: &Publication,
		(x, y): (f64, f64),
		node_type: NodeType,
		side: Side,
		group: NodeGroup,
	) -> Self {
		Self {
			id: publication.id.clone(),
			name: publication.name.clone(),
			category: publication.category.clone(),
			subscriber_count: publication.subscriber_count,
			x,
			y,
			node_type,
			side,
			group,
		}
	}
}

/// A routed recommendation between two placed nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
	/// `"edge-{index}-{source}-{target}"`, unique per recommendation.
	pub id: String,
	/// Recommender node.
	pub source: Arc<ProcessedNode>,
	/// Recommended node.
	pub target: Arc<ProcessedNode>,
	/// Serialized as an SVG cubic-bezier path string.
	pub path: Curve,
	/// Visual weight in `[0.1, 1.0]`.
	pub strength: f64,
}

/// Canvas size the layout is computed for.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
	/// Width in px.
	pub width: f64,
	/// Height in px.
	pub height: f64,
}

impl Dimensions {
	/// Canvas of `width` by `height` px.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Column x coordinate for `side`.
	pub fn column_x(&self, side: Side) -> f64 {
		self.width * side.x_fraction()
	}
}

impl Default for Dimensions {
	fn default() -> Self {
		Self {
			width: 800.0,
			height: 600.0,
		}
	}
}

/// Output handed to the renderer.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NetworkGraph {
	/// Placed nodes, left column first.
	pub nodes: Vec<Arc<ProcessedNode>>,
	/// Bundled edges.
	#[serde(rename = "links")]
	pub edges: Vec<Edge>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn subscriber_count_round_trips_through_json_null() {
		let publication: Publication = serde_json::from_str(
			r#"{"id":"a","name":"A","category":"Newsletter","subscriber_count":null,"is_bestseller":true}"#,
		)
		.unwrap();
		assert_eq!(publication.subscriber_count, SubscriberCount::Unknown);

		let publication: Publication = serde_json::from_str(
			r#"{"id":"a","name":"A","category":"Newsletter","subscriber_count":1200,"is_bestseller":false}"#,
		)
		.unwrap();
		assert_eq!(publication.subscriber_count, SubscriberCount::Known(1200.0));
	}

	#[test]
	fn fractional_counts_load_and_whole_counts_print_bare() {
		let publication: Publication = serde_json::from_str(
			r#"{"id":"a","name":"A","category":"Newsletter","subscriber_count":1200.0,"is_bestseller":false}"#,
		)
		.unwrap();
		assert_eq!(publication.subscriber_count, SubscriberCount::Known(1200.0));
		assert_eq!(serde_json::to_string(&publication.subscriber_count).unwrap(), "1200");

		let publication: Publication =
			serde_json::from_str(r#"{"id":"a","name":"A","category":"Newsletter","subscriber_count":2.5e3,"is_bestseller":true}"#)
				.unwrap();
		assert_eq!(publication.subscriber_count, SubscriberCount::Known(2500.0));

		assert_eq!(serde_json::to_string(&SubscriberCount::Known(12.5)).unwrap(), "12.5");
		assert_eq!(serde_json::to_string(&SubscriberCount::Unknown).unwrap(), "null");
	}

	#[test]
	fn unknown_counts_sort_after_known() {
		use SubscriberCount::*;
		assert_eq!(Known(5.0).cmp_descending(Known(10.0)), Ordering::Greater);
		assert_eq!(Known(-5.0).cmp_descending(Unknown), Ordering::Less);
		assert_eq!(Unknown.cmp_descending(Known(0.0)), Ordering::Greater);
		assert_eq!(Unknown.cmp_descending(Unknown), Ordering::Equal);
	}

	#[test]
	fn node_serializes_with_wire_names() {
		let publication = Publication {
			id: "p".into(),
			name: "P".into(),
			category: "Newsletter".into(),
			subscriber_count: SubscriberCount::Unknown,
			is_bestseller: false,
		};
		let node = ProcessedNode::place(
			&publication,
			(600.0, 80.0),
			NodeType::Recommendation,
			Side::Right,
			NodeGroup::RecommendationOnly,
		);
		let json = serde_json::to_value(&node).unwrap();
		assert_eq!(json["nodeType"], "recommendation");
		assert_eq!(json["group"], "recommendation-only");
		assert_eq!(json["side"], "right");
		assert!(json["subscriber_count"].is_null());
	}
}
