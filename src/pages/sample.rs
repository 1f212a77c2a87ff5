//! Deterministic stand-ins for the JSON exports the server would supply.

use serde_json::{Value, json};

const NEWSLETTERS: &[&str] = &[
	"lenny", "pragmatic", "platformer", "noahpinion", "astralcodex", "thefp", "slowboring",
	"construction", "fixthenews", "yourlocalepidemiologist", "oneusefulthing", "garymarcus",
	"thediff", "notboring", "importai", "semianalysis", "chinatalk", "persuasion", "commonplace",
	"experimental-history", "dynomight", "worksinprogress", "thesplit", "quillette",
];

const CUSTOM_DOMAINS: &[&str] = &[
	"https://www.lennysnewsletter.com",
	"https://stratechery.com",
	"https://www.thefp.org",
	"https://marginalrevolution.net",
	"https://example.io",
];

const CATEGORIES: &[&str] = &[
	"technology", "business", "us-politics", "culture", "science", "health", "finance",
	"education", "history", "food-and-drink",
];

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn publication_url(i: usize) -> String {
	match NEWSLETTERS.get(i) {
		Some(slug) => format!("https://{slug}.substack.com"),
		None => CUSTOM_DOMAINS[(i - NEWSLETTERS.len()) % CUSTOM_DOMAINS.len()].to_string(),
	}
}

/// Recommendation map and subscriber count list for `recommenders` bestsellers.
pub fn publication_exports(recommenders: usize) -> (String, String) {
	let pool = NEWSLETTERS.len() + CUSTOM_DOMAINS.len();
	let mut map = serde_json::Map::new();
	for i in 0..recommenders.min(pool) {
		let fan_out = 1 + (rand_simple(i * 7) * 4.0) as usize;
		let targets: Vec<Value> = (0..fan_out)
			.map(|j| {
				let pick = (rand_simple(i * 31 + j * 17) * pool as f64) as usize;
				Value::String(publication_url(pick % pool))
			})
			.collect();
		map.insert(publication_url(i), Value::Array(targets));
	}

	// Every third publication has no joined subscriber count.
	let counts: Vec<Value> = (0..pool)
		.filter(|i| i % 3 != 2)
		.map(|i| {
			json!({
				"publication_url": publication_url(i),
				"subscriber_count": 2_000 + (rand_simple(i * 13) * 250_000.0) as i64,
			})
		})
		.collect();

	(Value::Array(vec![Value::Object(map)]).to_string(), Value::Array(counts).to_string())
}

/// Category-to-category recommendation weights and per-category statistics.
pub fn category_exports() -> (String, String) {
	let mut recommendations = serde_json::Map::new();
	for (i, source) in CATEGORIES.iter().enumerate() {
		let mut targets = serde_json::Map::new();
		for (j, target) in CATEGORIES.iter().enumerate() {
			let weight = (rand_simple(i * 11 + j * 3) * 60.0) as i64;
			if i != j && weight > 12 {
				targets.insert(target.to_string(), json!(weight));
			}
		}
		recommendations.insert(source.to_string(), Value::Object(targets));
	}

	let stats: Vec<Value> = CATEGORIES
		.iter()
		.enumerate()
		.map(|(i, category)| {
			json!({
				"category": category,
				"median_subscriber_count": (rand_simple(i * 5) * 40_000.0).round(),
				"outgoing": (rand_simple(i * 19) * 700.0) as u64,
				"incoming": (rand_simple(i * 23) * 700.0) as u64,
			})
		})
		.collect();

	(Value::Object(recommendations).to_string(), Value::Array(stats).to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::category::{CategoryRecommendations, CategoryStats};
	use crate::network::dataset::assemble;

	#[test]
	fn publication_exports_assemble() {
		let (recs, counts) = publication_exports(12);
		let dataset = assemble(&recs, &counts).unwrap();
		assert_eq!(dataset.publications.iter().filter(|p| p.is_bestseller).count(), 12);
		assert!(!dataset.recommendations.is_empty());
		assert_eq!(publication_exports(12), (recs, counts));
	}

	#[test]
	fn category_exports_parse() {
		let (recs, stats) = category_exports();
		let recs: CategoryRecommendations = serde_json::from_str(&recs).unwrap();
		let stats: Vec<CategoryStats> = serde_json::from_str(&stats).unwrap();
		assert_eq!(recs.len(), CATEGORIES.len());
		assert_eq!(stats.len(), CATEGORIES.len());
	}
}
