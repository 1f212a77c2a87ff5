//! Assembly of publication and recommendation records from the raw JSON
//! exports: a recommender → recommended URL map and a subscriber count list.

use std::collections::{HashMap, HashSet};

use log::info;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use super::types::{Publication, Recommendation, SubscriberCount};

/// Failure to read one of the JSON exports.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// Not valid JSON.
	#[error("malformed dataset JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// Valid JSON of the wrong shape.
	#[error("unexpected dataset shape: {0}")]
	UnexpectedShape(&'static str),
}

/// Records ready for the layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
	/// Every publication named in either export.
	pub publications: Vec<Publication>,
	/// One per recommender and recommended pair.
	pub recommendations: Vec<Recommendation>,
}

#[derive(Deserialize)]
struct CountRecord {
	#[serde(default)]
	publication_url: Option<String>,
	#[serde(default)]
	subscriber_count: Option<f64>,
}

/// Join the recommendation export with the subscriber count export.
pub fn assemble(recommendations_json: &str, subscriber_counts_json: &str) -> Result<Dataset, DatasetError> {
	let raw: Value = serde_json::from_str(recommendations_json)?;
	let Value::Array(items) = raw else {
		return Err(DatasetError::UnexpectedShape("recommendations must be a JSON array"));
	};
	let counts: Vec<CountRecord> = serde_json::from_str(subscriber_counts_json)?;

	let count_by_url: HashMap<String, f64> = counts
		.into_iter()
		.filter_map(|record| {
			let url = record.publication_url.filter(|url| !url.is_empty())?;
			let count = record.subscriber_count.filter(|&count| count != 0.0)?;
			Some((url, count))
		})
		.collect();
	info!("Loaded subscriber count data for {} publications", count_by_url.len());

	let map = match items.into_iter().next() {
		None => return Ok(Dataset::default()),
		Some(Value::Object(map)) => map,
		Some(_) => return Err(DatasetError::UnexpectedShape("first element must be an object")),
	};

	let mut seen = HashSet::new();
	let mut urls = Vec::new();
	let mut recommendations = Vec::new();
	for (recommender, recommended) in &map {
		if seen.insert(recommender.as_str()) {
			urls.push(recommender.as_str());
		}
		let Value::Array(targets) = recommended else {
			return Err(DatasetError::UnexpectedShape("recommended publications must be an array"));
		};
		for target in targets {
			let Value::String(target) = target else {
				return Err(DatasetError::UnexpectedShape("recommended publication must be a URL string"));
			};
			if seen.insert(target.as_str()) {
				urls.push(target.as_str());
			}
			recommendations.push(Recommendation::new(recommender.as_str(), target.as_str()));
		}
	}

	let publications: Vec<Publication> = urls
		.into_iter()
		.map(|url| Publication {
			id: url.to_owned(),
			name: extract_publication_name(url),
			category: categorize_publication(url).to_owned(),
			subscriber_count: count_by_url
				.get(url)
				.copied()
				.map_or(SubscriberCount::Unknown, SubscriberCount::Known),
			is_bestseller: map.contains_key(url),
		})
		.collect();

	let with_counts = publications
		.iter()
		.filter(|publication| publication.subscriber_count.known().is_some())
		.count();
	info!("Publications with subscriber data: {} out of {}", with_counts, publications.len());

	Ok(Dataset {
		publications,
		recommendations,
	})
}

/// Distinct publication URLs listed in the subscriber count export, in order,
/// whether or not a count was recorded for them.
pub fn count_export_urls(subscriber_counts_json: &str) -> Result<Vec<String>, DatasetError> {
	let counts: Vec<CountRecord> = serde_json::from_str(subscriber_counts_json)?;
	let mut seen = HashSet::new();
	Ok(counts
		.into_iter()
		.filter_map(|record| record.publication_url.filter(|url| !url.is_empty()))
		.filter(|url| seen.insert(url.clone()))
		.collect())
}

fn capitalize(label: &str) -> String {
	let mut chars = label.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Readable name for a publication URL: the substack subdomain, else the
/// registrable domain label.
pub fn extract_publication_name(url: &str) -> String {
	let Ok(parsed) = Url::parse(url) else {
		let bare = url
			.strip_prefix("https://")
			.or_else(|| url.strip_prefix("http://"))
			.unwrap_or(url);
		return bare.split('/').next().unwrap_or_default().to_owned();
	};

	let host = parsed.host_str().unwrap_or_default();
	let host = host.strip_prefix("www.").unwrap_or(host);
	if host.contains(".substack.com") {
		return capitalize(host.split('.').next().unwrap_or_default());
	}

	let labels: Vec<&str> = host.split('.').collect();
	match labels.len() {
		n if n >= 2 => capitalize(labels[n - 2]),
		_ => host.to_owned(),
	}
}

/// Coarse category from the URL alone.
pub fn categorize_publication(url: &str) -> &'static str {
	if url.contains("substack.com") {
		"Newsletter"
	} else if [".com", ".org", ".net"].iter().any(|tld| url.contains(tld)) {
		"Website"
	} else {
		"Publication"
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const RECOMMENDATIONS: &str = r#"[{
		"https://lenny.substack.com": ["https://www.lennysnewsletter.com", "https://fixthenews.com"],
		"https://fixthenews.com": ["https://lenny.substack.com", "https://example.io"]
	}]"#;

	const COUNTS: &str = r#"[
		{"publication_url": "https://lenny.substack.com", "subscriber_count": 120000},
		{"publication_url": "https://example.io", "subscriber_count": 0},
		{"publication_url": null, "subscriber_count": 5},
		{"subscriber_count": 7}
	]"#;

	#[test]
	fn assembles_publications_in_first_seen_order() {
		let dataset = assemble(RECOMMENDATIONS, COUNTS).unwrap();
		let ids: Vec<&str> = dataset.publications.iter().map(|p| p.id.as_str()).collect();
		assert_eq!(
			ids,
			[
				"https://lenny.substack.com",
				"https://www.lennysnewsletter.com",
				"https://fixthenews.com",
				"https://example.io",
			]
		);
		assert_eq!(dataset.recommendations.len(), 4);
		assert_eq!(
			dataset.recommendations[2],
			Recommendation::new("https://fixthenews.com", "https://lenny.substack.com")
		);
	}

	#[test]
	fn joins_counts_and_flags_bestsellers() {
		let dataset = assemble(RECOMMENDATIONS, COUNTS).unwrap();
		let lenny = &dataset.publications[0];
		assert_eq!(lenny.name, "Lenny");
		assert_eq!(lenny.category, "Newsletter");
		assert_eq!(lenny.subscriber_count, SubscriberCount::Known(120_000.0));
		assert!(lenny.is_bestseller);

		let example = &dataset.publications[3];
		assert_eq!(example.subscriber_count, SubscriberCount::Unknown);
		assert_eq!(example.category, "Publication");
		assert!(!example.is_bestseller);
	}

	#[test]
	fn fractional_counts_are_kept() {
		let counts = r#"[{"publication_url": "https://fixthenews.com", "subscriber_count": 1234.5}]"#;
		let dataset = assemble(RECOMMENDATIONS, counts).unwrap();
		assert_eq!(dataset.publications[2].subscriber_count, SubscriberCount::Known(1234.5));
	}

	#[test]
	fn export_urls_include_zero_counts() {
		let urls = count_export_urls(COUNTS).unwrap();
		assert_eq!(urls, ["https://lenny.substack.com", "https://example.io"]);
	}

	#[test]
	fn empty_export_is_an_empty_dataset() {
		assert_eq!(assemble("[]", "[]").unwrap(), Dataset::default());
	}

	#[test]
	fn rejects_unexpected_shapes() {
		assert!(matches!(assemble("{}", "[]"), Err(DatasetError::UnexpectedShape(_))));
		assert!(matches!(assemble("[1]", "[]"), Err(DatasetError::UnexpectedShape(_))));
		assert!(matches!(
			assemble(r#"[{"a": [1]}]"#, "[]"),
			Err(DatasetError::UnexpectedShape(_))
		));
		assert!(matches!(assemble("[", "[]"), Err(DatasetError::Json(_))));
	}

	#[test]
	fn publication_names() {
		assert_eq!(extract_publication_name("https://lenny.substack.com"), "Lenny");
		assert_eq!(extract_publication_name("https://www.lennysnewsletter.com/p/x"), "Lennysnewsletter");
		assert_eq!(extract_publication_name("https://news.bbc.co.uk"), "Co");
		assert_eq!(extract_publication_name("http://localhost:8080"), "localhost");
		assert_eq!(extract_publication_name("lenny.com/about"), "lenny.com");
	}

	#[test]
	fn categories() {
		assert_eq!(categorize_publication("https://a.substack.com"), "Newsletter");
		assert_eq!(categorize_publication("https://a.org"), "Website");
		assert_eq!(categorize_publication("https://a.io"), "Publication");
	}
}
