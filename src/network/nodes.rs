use std::collections::HashSet;
use std::sync::Arc;

use super::classify::{identify_dual_roles, recommended_ids};
use super::layout::{position_left, position_right};
use super::types::{Dimensions, ProcessedNode, Publication, Recommendation};

/// Build the full node set: bestsellers on the left, recommended publications
/// on the right, dual-role publications on both.
pub fn process_publications(
	publications: &[Publication],
	recommendations: &[Recommendation],
	dims: Dimensions,
) -> Vec<Arc<ProcessedNode>> {
	let dual_ids = identify_dual_roles(publications, recommendations);
	let recommended = recommended_ids(recommendations);

	let bestsellers: Vec<&Publication> = publications.iter().filter(|p| p.is_bestseller).collect();
	let bestseller_ids: HashSet<&str> = bestsellers.iter().map(|p| p.id.as_str()).collect();
	let recommended_pubs: Vec<&Publication> = publications
		.iter()
		.filter(|p| recommended.contains(p.id.as_str()))
		.collect();
	let right_only: Vec<&Publication> = recommended_pubs
		.iter()
		.copied()
		.filter(|p| !bestseller_ids.contains(p.id.as_str()))
		.collect();

	let left = position_left(&bestsellers, &dual_ids, dims);
	let right = position_right(&recommended_pubs, &right_only, &dual_ids, dims);

	left.into_iter().chain(right).map(Arc::new).collect()
}
