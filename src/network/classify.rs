use std::collections::HashSet;

use super::types::{Publication, Recommendation};

/// Ids of publications flagged as bestsellers.
pub fn bestseller_ids(publications: &[Publication]) -> HashSet<&str> {
	publications
		.iter()
		.filter(|publication| publication.is_bestseller)
		.map(|publication| publication.id.as_str())
		.collect()
}

/// Ids that are the target of at least one recommendation.
pub fn recommended_ids(recommendations: &[Recommendation]) -> HashSet<&str> {
	recommendations
		.iter()
		.map(|recommendation| recommendation.recommended_id.as_str())
		.collect()
}

/// Publications that are both bestsellers and recommended by someone.
pub fn identify_dual_roles(
	publications: &[Publication],
	recommendations: &[Recommendation],
) -> HashSet<String> {
	let recommended = recommended_ids(recommendations);
	bestseller_ids(publications)
		.into_iter()
		.filter(|id| recommended.contains(id))
		.map(str::to_owned)
		.collect()
}
