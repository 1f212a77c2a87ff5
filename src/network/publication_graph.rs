//! Publication-level force graph with sizes, colours, labels and groups worked
//! out up front, plus per-publication recommendation counts.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::force::{BESTSELLER_COLOR, GraphData, GraphLink, GraphNode, LINK_COLOR, PUBLICATION_COLOR};
use super::types::{Publication, Recommendation, SubscriberCount};

/// Non-bestsellers above 10,000 subscribers.
pub const MID_TIER_COLOR: &str = "#45b7d1";
/// Non-bestsellers at or below 10,000 subscribers.
pub const SMALL_TIER_COLOR: &str = "#96ceb4";

/// In-degree above which a publication counts as highly recommended.
pub const HIGHLY_RECOMMENDED_IN_DEGREE: usize = 10;

/// Log-scaled size in `[2, 20]`; publications without a count get 8 as
/// bestsellers and 4 otherwise.
pub fn calculate_node_size(count: SubscriberCount, is_bestseller: bool) -> f64 {
	match count {
		SubscriberCount::Known(count) if count > 0.0 => (2.0 + (count + 1.0).log10() * 2.0).clamp(2.0, 20.0),
		_ if is_bestseller => 8.0,
		_ => 4.0,
	}
}

/// Bestsellers are orange; everything else is tiered by audience.
pub fn node_color(count: SubscriberCount, is_bestseller: bool) -> &'static str {
	let count = count.known().unwrap_or(0.0);
	if is_bestseller {
		BESTSELLER_COLOR
	} else if count > 50_000.0 {
		PUBLICATION_COLOR
	} else if count > 10_000.0 {
		MID_TIER_COLOR
	} else {
		SMALL_TIER_COLOR
	}
}

/// `"Name (12,345 subs)"`, or just the name without a positive count.
pub fn node_label(name: &str, count: SubscriberCount) -> String {
	match count {
		SubscriberCount::Known(count) if count > 0.0 => format!("{name} ({} subs)", group_thousands(count)),
		_ => name.to_owned(),
	}
}

fn group_thousands(value: f64) -> String {
	let text = if value.fract() == 0.0 {
		format!("{}", value as i64)
	} else {
		value.to_string()
	};
	let (whole, fraction) = text.split_once('.').map_or((text.as_str(), ""), |(w, f)| (w, f));
	let (sign, digits) = whole.strip_prefix('-').map_or(("", whole), |d| ("-", d));

	let mut grouped = String::with_capacity(text.len() + digits.len() / 3);
	grouped.push_str(sign);
	for (i, digit) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(digit);
	}
	if !fraction.is_empty() {
		grouped.push('.');
		grouped.push_str(fraction);
	}
	grouped
}

/// Clustering hint for the force layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationGroup {
	/// Bestseller that is also recommended.
	DualRole,
	/// Bestseller nobody recommends.
	Bestseller,
	/// Recommended more than [`HIGHLY_RECOMMENDED_IN_DEGREE`] times.
	HighlyRecommended,
	/// Recommended at least once.
	Recommended,
	/// Neither recommending nor recommended.
	Other,
}

impl PublicationGroup {
	fn classify(is_bestseller: bool, in_degree: usize) -> Self {
		match (is_bestseller, in_degree) {
			(true, 0) => Self::Bestseller,
			(true, _) => Self::DualRole,
			(false, n) if n > HIGHLY_RECOMMENDED_IN_DEGREE => Self::HighlyRecommended,
			(false, 0) => Self::Other,
			(false, _) => Self::Recommended,
		}
	}
}

/// A publication with its precomputed look and degree counts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PublicationNode {
	/// Publication URL.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Topic category.
	pub category: String,
	/// Audience size.
	pub subscriber_count: SubscriberCount,
	/// Bestseller badge.
	pub is_bestseller: bool,
	/// See [`calculate_node_size`].
	#[serde(rename = "val")]
	pub size: f64,
	/// See [`node_color`].
	pub color: &'static str,
	/// See [`node_label`].
	pub label: String,
	/// Recommendations received.
	#[serde(rename = "inDegree")]
	pub in_degree: usize,
	/// Recommendations made.
	#[serde(rename = "outDegree")]
	pub out_degree: usize,
	/// Clustering hint.
	pub group: PublicationGroup,
}

/// Recommender to recommended, by URL.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PublicationLink {
	/// Recommender URL.
	pub source: String,
	/// Recommended URL.
	pub target: String,
}

/// Summary counts for a [`PublicationGraph`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PublicationMetadata {
	/// Nodes.
	pub total_nodes: usize,
	/// Links, including ones to unknown publications.
	pub total_links: usize,
	/// Bestseller nodes.
	pub bestsellers_count: usize,
	/// Nodes with a positive subscriber count.
	pub nodes_with_subscribers: usize,
}

/// Publication-level graph in the shape of the optimized export.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PublicationGraph {
	/// Largest audience first.
	pub nodes: Vec<PublicationNode>,
	/// One per recommendation.
	pub links: Vec<PublicationLink>,
	/// Counts.
	pub metadata: PublicationMetadata,
}

fn count_or_zero(count: SubscriberCount) -> f64 {
	count.known().unwrap_or(0.0)
}

/// One node per publication, one link per recommendation. Nodes run from the
/// largest audience down, ties by name.
pub fn publication_graph(publications: &[Publication], recommendations: &[Recommendation]) -> PublicationGraph {
	let mut nodes: Vec<PublicationNode> = publications
		.iter()
		.map(|publication| PublicationNode {
			id: publication.id.clone(),
			name: publication.name.clone(),
			category: publication.category.clone(),
			subscriber_count: publication.subscriber_count,
			is_bestseller: publication.is_bestseller,
			size: calculate_node_size(publication.subscriber_count, publication.is_bestseller),
			color: node_color(publication.subscriber_count, publication.is_bestseller),
			label: node_label(&publication.name, publication.subscriber_count),
			in_degree: 0,
			out_degree: 0,
			group: PublicationGroup::Other,
		})
		.collect();
	nodes.sort_by(|a, b| {
		count_or_zero(b.subscriber_count)
			.partial_cmp(&count_or_zero(a.subscriber_count))
			.unwrap_or(Ordering::Equal)
			.then_with(|| a.name.cmp(&b.name))
	});

	let links: Vec<PublicationLink> = recommendations
		.iter()
		.map(|rec| PublicationLink {
			source: rec.recommender_id.clone(),
			target: rec.recommended_id.clone(),
		})
		.collect();

	let index: HashMap<String, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.clone(), i))
		.collect();
	for link in &links {
		if let Some(&i) = index.get(&link.source) {
			nodes[i].out_degree += 1;
		}
		if let Some(&i) = index.get(&link.target) {
			nodes[i].in_degree += 1;
		}
	}
	for node in &mut nodes {
		node.group = PublicationGroup::classify(node.is_bestseller, node.in_degree);
	}

	let metadata = PublicationMetadata {
		total_nodes: nodes.len(),
		total_links: links.len(),
		bestsellers_count: nodes.iter().filter(|node| node.is_bestseller).count(),
		nodes_with_subscribers: nodes
			.iter()
			.filter(|node| count_or_zero(node.subscriber_count) > 0.0)
			.count(),
	};

	PublicationGraph {
		nodes,
		links,
		metadata,
	}
}

impl PublicationGraph {
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

/// Key used to match the same publication across URL spellings:
/// `lenny.substack.com` → `lenny`, `www.lennysnewsletter.com` → `lennysnewsletter`.
pub fn extract_publication_identifier(url: &str) -> String {
	let bare = url.replace("https://", "").replace("http://", "");
	let parts: Vec<&str> = bare.split('.').collect();
	match parts.as_slice() {
		[.., "substack", "com"] if parts.len() >= 3 => parts[0].to_owned(),
		["www", domain, _, ..] => (*domain).to_owned(),
		[first, _, ..] => (*first).to_owned(),
		_ => bare.clone(),
	}
}

/// Incoming and outgoing recommendation totals for one known publication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecommendationCount {
	/// URL as it appears in the subscriber-count export.
	pub publication_url: String,
	/// Times other publications recommend it.
	pub incoming_recommendations: usize,
	/// Length of its own recommendation list.
	pub outgoing_recommendations: usize,
	/// Incoming plus outgoing.
	pub total_recommendations: usize,
}

/// Count recommendations per publication in `known_urls`, matching URLs by
/// [`extract_publication_identifier`]. A recommender's outgoing total is the
/// size of its own list; when two recommenders share an identifier the later
/// list wins. Sorted by total, busiest first.
pub fn recommendation_counts(recommendations: &[Recommendation], known_urls: &[String]) -> Vec<RecommendationCount> {
	let mut known: Vec<&str> = Vec::new();
	let mut url_by_identifier: HashMap<String, &str> = HashMap::new();
	for url in known_urls {
		if !known.contains(&url.as_str()) {
			known.push(url);
		}
		url_by_identifier.insert(extract_publication_identifier(url), url);
	}

	let mut list_sizes: Vec<(&str, usize)> = Vec::new();
	let mut list_index: HashMap<&str, usize> = HashMap::new();
	let mut incoming: HashMap<&str, usize> = HashMap::new();
	for rec in recommendations {
		let slot = *list_index.entry(rec.recommender_id.as_str()).or_insert_with(|| {
			list_sizes.push((rec.recommender_id.as_str(), 0));
			list_sizes.len() - 1
		});
		list_sizes[slot].1 += 1;

		if let Some(&url) = url_by_identifier.get(&extract_publication_identifier(&rec.recommended_id)) {
			*incoming.entry(url).or_default() += 1;
		}
	}

	let mut outgoing: HashMap<&str, usize> = HashMap::new();
	for (recommender, size) in list_sizes {
		if let Some(&url) = url_by_identifier.get(&extract_publication_identifier(recommender)) {
			outgoing.insert(url, size);
		}
	}

	let mut counts: Vec<RecommendationCount> = known
		.into_iter()
		.map(|url| {
			let incoming = incoming.get(url).copied().unwrap_or(0);
			let outgoing = outgoing.get(url).copied().unwrap_or(0);
			RecommendationCount {
				publication_url: url.to_owned(),
				incoming_recommendations: incoming,
				outgoing_recommendations: outgoing,
				total_recommendations: incoming + outgoing,
			}
		})
		.collect();
	counts.sort_by(|a, b| b.total_recommendations.cmp(&a.total_recommendations));
	counts
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::network::fixtures::publication;
	use crate::network::types::SubscriberCount::{Known, Unknown};

	#[test]
	fn sizes_are_log_scaled_and_clamped() {
		assert!((calculate_node_size(Known(999.0), false) - 8.0).abs() < 1e-12);
		assert_eq!(calculate_node_size(Known(1e12), false), 20.0);
		assert_eq!(calculate_node_size(Unknown, true), 8.0);
		assert_eq!(calculate_node_size(Unknown, false), 4.0);
		assert_eq!(calculate_node_size(Known(0.0), false), 4.0);
		assert_eq!(calculate_node_size(Known(-5.0), true), 8.0);
	}

	#[test]
	fn colors_by_tier() {
		assert_eq!(node_color(Known(10.0), true), BESTSELLER_COLOR);
		assert_eq!(node_color(Known(60_000.0), false), "#4ecdc4");
		assert_eq!(node_color(Known(20_000.0), false), "#45b7d1");
		assert_eq!(node_color(Known(10_000.0), false), "#96ceb4");
		assert_eq!(node_color(Unknown, false), "#96ceb4");
	}

	#[test]
	fn labels_group_thousands() {
		assert_eq!(node_label("Lenny", Known(1_234_567.0)), "Lenny (1,234,567 subs)");
		assert_eq!(node_label("Tiny", Known(999.0)), "Tiny (999 subs)");
		assert_eq!(node_label("Half", Known(1_200.5)), "Half (1,200.5 subs)");
		assert_eq!(node_label("None", Unknown), "None");
		assert_eq!(node_label("Zero", Known(0.0)), "Zero");
	}

	fn sample() -> PublicationGraph {
		let pubs = [
			publication("https://a.substack.com", "A", Known(5_000.0), true),
			publication("https://b.com", "B", Known(90_000.0), true),
			publication("https://c.org", "C", Unknown, false),
			publication("https://d.net", "D", Unknown, false),
		];
		let recs = [
			Recommendation::new("https://a.substack.com", "https://b.com"),
			Recommendation::new("https://a.substack.com", "https://c.org"),
			Recommendation::new("https://b.com", "https://c.org"),
		];
		publication_graph(&pubs, &recs)
	}

	#[test]
	fn nodes_sorted_with_degrees_and_groups() {
		let graph = sample();
		let rows: Vec<(&str, usize, usize, PublicationGroup)> = graph
			.nodes
			.iter()
			.map(|node| (node.name.as_str(), node.in_degree, node.out_degree, node.group))
			.collect();
		assert_eq!(
			rows,
			[
				("B", 1, 1, PublicationGroup::DualRole),
				("A", 0, 2, PublicationGroup::Bestseller),
				("C", 2, 0, PublicationGroup::Recommended),
				("D", 0, 0, PublicationGroup::Other),
			]
		);
		assert_eq!(
			graph.metadata,
			PublicationMetadata {
				total_nodes: 4,
				total_links: 3,
				bestsellers_count: 2,
				nodes_with_subscribers: 2,
			}
		);
	}

	#[test]
	fn many_recommendations_make_a_publication_highly_recommended() {
		assert_eq!(PublicationGroup::classify(false, 11), PublicationGroup::HighlyRecommended);
		assert_eq!(PublicationGroup::classify(false, 10), PublicationGroup::Recommended);
		assert_eq!(PublicationGroup::classify(true, 50), PublicationGroup::DualRole);
	}

	#[test]
	fn serializes_with_export_names() {
		let json = serde_json::to_value(sample()).unwrap();
		let node = &json["nodes"][0];
		assert_eq!(node["val"], serde_json::json!(calculate_node_size(Known(90_000.0), true)));
		assert_eq!(node["inDegree"], 1);
		assert_eq!(node["group"], "dual-role");
		assert_eq!(node["subscriber_count"], 90000);
		assert_eq!(json["metadata"]["bestsellers_count"], 2);
	}

	#[test]
	fn graph_data_keeps_precomputed_look() {
		let graph = sample();
		let data = graph.to_graph_data();
		assert_eq!(data.nodes.len(), 4);
		assert_eq!(data.nodes[0].label.as_deref(), Some("B (90,000 subs)"));
		assert_eq!(data.nodes[0].color, BESTSELLER_COLOR);
		assert_eq!(data.links.len(), 3);
	}

	#[test]
	fn identifiers_ignore_scheme_and_www() {
		assert_eq!(extract_publication_identifier("https://lenny.substack.com"), "lenny");
		assert_eq!(extract_publication_identifier("https://lenny.com"), "lenny");
		assert_eq!(extract_publication_identifier("https://www.lennysnewsletter.com"), "lennysnewsletter");
		assert_eq!(extract_publication_identifier("http://fixthenews.com"), "fixthenews");
		assert_eq!(extract_publication_identifier("localhost"), "localhost");
	}

	#[test]
	fn counts_match_across_url_spellings() {
		let recs = [
			Recommendation::new("https://lenny.substack.com", "https://fixthenews.com"),
			Recommendation::new("https://lenny.substack.com", "https://www.other.com"),
			Recommendation::new("https://fixthenews.com", "https://lenny.substack.com"),
			Recommendation::new("https://unknown.io", "https://fixthenews.com"),
		];
		let known = [
			"https://lenny.com".to_string(),
			"https://fixthenews.com".to_string(),
			"https://quiet.com".to_string(),
		];
		let counts = recommendation_counts(&recs, &known);
		let rows: Vec<(&str, usize, usize, usize)> = counts
			.iter()
			.map(|c| {
				(
					c.publication_url.as_str(),
					c.incoming_recommendations,
					c.outgoing_recommendations,
					c.total_recommendations,
				)
			})
			.collect();
		assert_eq!(
			rows,
			[
				("https://lenny.com", 1, 2, 3),
				("https://fixthenews.com", 2, 1, 3),
				("https://quiet.com", 0, 0, 0),
			]
		);
	}
}
