//! Shared test data: three bestsellers, one of them also recommended, plus a
//! small set centred on one dual-role hub.

use super::types::{Publication, Recommendation, SubscriberCount};

pub fn publication(id: &str, name: &str, count: SubscriberCount, is_bestseller: bool) -> Publication {
	Publication {
		id: id.into(),
		name: name.into(),
		category: "Newsletter".into(),
		subscriber_count: count,
		is_bestseller,
	}
}

pub fn publications() -> Vec<Publication> {
	use SubscriberCount::Known;
	vec![
		publication("pub1", "Bestseller One", Known(50_000.0), true),
		publication("pub2", "Bestseller Two", Known(30_000.0), true),
		publication("pub3", "Recommendation Only", Known(5_000.0), false),
		publication("pub4", "Dual Role", Known(25_000.0), true),
	]
}

pub fn recommendations() -> Vec<Recommendation> {
	vec![
		Recommendation::new("pub1", "pub3"),
		Recommendation::new("pub1", "pub4"),
		Recommendation::new("pub2", "pub3"),
	]
}

/// Dual-role `hub` that recommends twice (once itself) and is recommended twice.
pub fn hub_publications() -> Vec<Publication> {
	use SubscriberCount::{Known, Unknown};
	vec![
		publication("lead", "Lead", Known(80_000.0), true),
		publication("hub", "Hub", Known(20_000.0), true),
		publication("leaf", "Leaf", Unknown, false),
	]
}

pub fn hub_recommendations() -> Vec<Recommendation> {
	vec![
		Recommendation::new("lead", "hub"),
		Recommendation::new("hub", "leaf"),
		Recommendation::new("hub", "hub"),
	]
}
