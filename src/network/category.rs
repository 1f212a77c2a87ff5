//! Category-level aggregation of the recommendation network.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::force::{GraphData, GraphLink, GraphNode, LINK_COLOR};

/// Source category → (target category → recommendation weight), in export
/// order. A repeated key replaces the earlier value but keeps its position.
pub type CategoryRecommendations = IndexMap<String, IndexMap<String, f64>>;

/// Per-category summary row of the category export.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CategoryStats {
	/// Category slug; rows without one are ignored.
	#[serde(default)]
	pub category: Option<String>,
	/// Median audience of the category's publications.
	#[serde(default)]
	pub median_subscriber_count: f64,
	/// Recommendations made from the category.
	#[serde(default)]
	pub outgoing: u64,
	/// Recommendations received by the category.
	#[serde(default)]
	pub incoming: u64,
}

/// Clustering hint derived from link degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryGroup {
	/// More than 30 links in total.
	HubCategory,
	/// More than 15 links in total.
	ConnectorCategory,
	/// Mostly outgoing.
	SourceCategory,
	/// Mostly incoming.
	TargetCategory,
	/// As many in as out.
	BalancedCategory,
}

impl CategoryGroup {
	fn classify(in_degree: usize, out_degree: usize) -> Self {
		match in_degree + out_degree {
			total if total > 30 => Self::HubCategory,
			total if total > 15 => Self::ConnectorCategory,
			_ => match out_degree.cmp(&in_degree) {
				Ordering::Greater => Self::SourceCategory,
				Ordering::Less => Self::TargetCategory,
				Ordering::Equal => Self::BalancedCategory,
			},
		}
	}
}

/// One category in the category graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryNode {
	/// `category_{slug}`.
	pub id: String,
	/// See [`display_name`].
	pub name: String,
	/// Median subscribers, truncated.
	pub subscriber_count: i64,
	/// Outgoing total from the stats row.
	pub outgoing_connections: u64,
	/// Incoming total from the stats row.
	pub incoming_connections: u64,
	/// See [`category_size`].
	#[serde(rename = "val")]
	pub size: f64,
	/// See [`category_color`].
	pub color: &'static str,
	/// Name, plus the median in thousands above 1,000.
	pub label: String,
	/// Incoming links.
	#[serde(rename = "inDegree")]
	pub in_degree: usize,
	/// Outgoing links.
	#[serde(rename = "outDegree")]
	pub out_degree: usize,
	/// Sum of incoming link values.
	#[serde(rename = "inWeight")]
	pub in_weight: f64,
	/// Sum of outgoing link values.
	#[serde(rename = "outWeight")]
	pub out_weight: f64,
	/// Clustering hint.
	pub group: CategoryGroup,
}

/// Weighted category-to-category link.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryLink {
	/// Recommending category node id.
	pub source: String,
	/// Recommended category node id.
	pub target: String,
	/// Recommendation weight from the export.
	pub value: f64,
}

/// Summary counts for a [`CategoryGraph`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CategoryMetadata {
	/// Nodes.
	pub total_nodes: usize,
	/// Links.
	pub total_links: usize,
	/// Distinct categories across both exports.
	pub categories_count: usize,
	/// Source and target pairs in the recommendation export.
	pub total_recommendations: usize,
}

/// Category graph in the shape of the category export.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CategoryGraph {
	/// Largest median first.
	pub nodes: Vec<CategoryNode>,
	/// In export order.
	pub links: Vec<CategoryLink>,
	/// Counts.
	pub metadata: CategoryMetadata,
}

fn node_id(category: &str) -> String {
	format!("category_{category}")
}

/// `"rock-and-roll"` → `"Rock And Roll"`.
pub fn display_name(category: &str) -> String {
	let mut prev_alpha = false;
	category
		.replace('-', " ")
		.chars()
		.flat_map(|c| {
			let out: Vec<char> = if prev_alpha {
				c.to_lowercase().collect()
			} else {
				c.to_uppercase().collect()
			};
			prev_alpha = c.is_alphabetic();
			out
		})
		.collect()
}

/// Log-scaled by median subscribers, 8 when unknown.
pub fn category_size(median_subscribers: f64) -> f64 {
	let size = if median_subscribers > 0.0 {
		5.0 + (median_subscribers + 1.0).log10() * 2.0
	} else {
		8.0
	};
	size.clamp(5.0, 30.0)
}

/// Colour tier by outgoing recommendation volume.
pub fn category_color(outgoing: u64) -> &'static str {
	match outgoing {
		n if n > 500 => "#ff6b35",
		n if n > 200 => "#4ecdc4",
		n if n > 100 => "#45b7d1",
		_ => "#96ceb4",
	}
}

/// Aggregate category statistics and category-to-category recommendation
/// weights into a graph of category nodes.
pub fn category_graph(recommendations: &CategoryRecommendations, stats: &[CategoryStats]) -> CategoryGraph {
	let stats_by_name: HashMap<&str, &CategoryStats> = stats
		.iter()
		.filter_map(|row| {
			let name = row.category.as_deref().filter(|name| !name.is_empty())?;
			Some((name, row))
		})
		.collect();

	let mut categories: BTreeSet<&str> = stats_by_name.keys().copied().collect();
	for (source, targets) in recommendations.iter() {
		categories.insert(source.as_str());
		categories.extend(targets.keys().map(String::as_str));
	}

	let mut nodes: Vec<CategoryNode> = categories
		.iter()
		.map(|&category| {
			let row = stats_by_name.get(category).copied().cloned().unwrap_or_default();
			let median = row.median_subscriber_count;
			let name = display_name(category);
			let label = if median > 1000.0 {
				format!("{name} ({}k median subs)", (median / 1000.0) as i64)
			} else {
				name.clone()
			};
			CategoryNode {
				id: node_id(category),
				name,
				subscriber_count: median as i64,
				outgoing_connections: row.outgoing,
				incoming_connections: row.incoming,
				size: category_size(median),
				color: category_color(row.outgoing),
				label,
				in_degree: 0,
				out_degree: 0,
				in_weight: 0.0,
				out_weight: 0.0,
				group: CategoryGroup::BalancedCategory,
			}
		})
		.collect();

	let links: Vec<CategoryLink> = recommendations
		.iter()
		.flat_map(|(source, targets)| {
			targets.iter().map(move |(target, &value)| CategoryLink {
				source: node_id(source),
				target: node_id(target),
				value,
			})
		})
		.collect();

	nodes.sort_by(|a, b| {
		b.subscriber_count
			.cmp(&a.subscriber_count)
			.then_with(|| a.name.cmp(&b.name))
	});

	let index: HashMap<String, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.clone(), i))
		.collect();
	for link in &links {
		if let Some(&i) = index.get(&link.source) {
			nodes[i].out_degree += 1;
			nodes[i].out_weight += link.value;
		}
		if let Some(&i) = index.get(&link.target) {
			nodes[i].in_degree += 1;
			nodes[i].in_weight += link.value;
		}
	}
	for node in &mut nodes {
		node.group = CategoryGroup::classify(node.in_degree, node.out_degree);
	}

	let metadata = CategoryMetadata {
		total_nodes: nodes.len(),
		total_links: links.len(),
		categories_count: categories.len(),
		total_recommendations: recommendations.iter().map(|(_, targets)| targets.len()).sum(),
	};

	CategoryGraph {
		nodes,
		links,
		metadata,
	}
}

impl CategoryGraph {
	/// Nodes and links for the force canvas.
	pub fn to_graph_data(&self) -> GraphData {
		GraphData {
			nodes: self
				.nodes
				.iter()
				.map(|node| GraphNode {
					id: node.id.clone(),
					label: Some(node.label.clone()),
					color: node.color.to_owned(),
					size: node.size,
				})
				.collect(),
			links: self
				.links
				.iter()
				.map(|link| GraphLink {
					source: link.source.clone(),
					target: link.target.clone(),
					color: LINK_COLOR.to_owned(),
				})
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn stats(category: &str, median: f64, outgoing: u64) -> CategoryStats {
		CategoryStats {
			category: Some(category.into()),
			median_subscriber_count: median,
			outgoing,
			incoming: 0,
		}
	}

	fn recommendations() -> CategoryRecommendations {
		let mut recs = CategoryRecommendations::new();
		recs.insert(
			"technology".into(),
			[("business".into(), 12.0), ("us-politics".into(), 3.0)].into_iter().collect(),
		);
		recs.insert("business".into(), [("technology".into(), 4.0)].into_iter().collect());
		recs
	}

	#[test]
	fn links_follow_export_order() {
		let recs: CategoryRecommendations = serde_json::from_str(
			r#"{"zines": {"news": 20, "art": 15}, "art": {"zines": 14}, "zines": {"news": 21, "art": 16}}"#,
		)
		.unwrap();
		assert_eq!(recs.len(), 2);

		let graph = category_graph(&recs, &[]);
		let links: Vec<(&str, &str, f64)> = graph
			.links
			.iter()
			.map(|link| (link.source.as_str(), link.target.as_str(), link.value))
			.collect();
		assert_eq!(
			links,
			[
				("category_zines", "category_news", 21.0),
				("category_zines", "category_art", 16.0),
				("category_art", "category_zines", 14.0),
			]
		);
	}

	#[test]
	fn nodes_cover_stats_sources_and_targets() {
		let graph = category_graph(
			&recommendations(),
			&[stats("technology", 4_500.0, 600), stats("art", 0.0, 0)],
		);
		let ids: Vec<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();
		assert_eq!(
			ids,
			["category_technology", "category_art", "category_business", "category_us-politics"]
		);
		assert_eq!(graph.metadata.total_nodes, 4);
		assert_eq!(graph.metadata.total_links, 3);
		assert_eq!(graph.metadata.total_recommendations, 3);
	}

	#[test]
	fn node_appearance() {
		let graph = category_graph(&recommendations(), &[stats("technology", 4_500.0, 600)]);
		let tech = &graph.nodes[0];
		assert_eq!(tech.name, "Technology");
		assert_eq!(tech.label, "Technology (4k median subs)");
		assert_eq!(tech.color, "#ff6b35");
		assert!((tech.size - (5.0 + 4_501f64.log10() * 2.0)).abs() < 1e-12);

		let politics = graph.nodes.iter().find(|n| n.id == "category_us-politics").unwrap();
		assert_eq!(politics.name, "Us Politics");
		assert_eq!(politics.label, "Us Politics");
		assert_eq!(politics.size, 8.0);
		assert_eq!(politics.color, "#96ceb4");
	}

	#[test]
	fn degrees_and_groups() {
		let graph = category_graph(&recommendations(), &[]);
		let node = |id: &str| graph.nodes.iter().find(|n| n.id == id).unwrap();

		let tech = node("category_technology");
		assert_eq!((tech.out_degree, tech.in_degree), (2, 1));
		assert_eq!(tech.out_weight, 15.0);
		assert_eq!(tech.group, CategoryGroup::SourceCategory);

		assert_eq!(node("category_business").group, CategoryGroup::BalancedCategory);
		assert_eq!(node("category_us-politics").group, CategoryGroup::TargetCategory);
	}

	#[test]
	fn heavy_categories_become_hubs() {
		assert_eq!(CategoryGroup::classify(20, 11), CategoryGroup::HubCategory);
		assert_eq!(CategoryGroup::classify(8, 8), CategoryGroup::ConnectorCategory);
	}

	#[test]
	fn title_casing() {
		assert_eq!(display_name("self-help"), "Self Help");
		assert_eq!(display_name("FOOD"), "Food");
		assert_eq!(display_name("rock'n'roll"), "Rock'N'Roll");
	}

	#[test]
	fn graph_data_mirrors_nodes() {
		let graph = category_graph(&recommendations(), &[]);
		let data = graph.to_graph_data();
		assert_eq!(data.nodes.len(), graph.nodes.len());
		assert_eq!(data.links.len(), 3);
	}
}
