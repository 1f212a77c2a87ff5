use leptos::prelude::*;
use log::{error, info};

use super::home::{RECOMMENDERS, sample_dataset};
use super::sample;
use crate::components::force_graph::ForceGraphCanvas;
use crate::network::dataset::{self, Dataset};
use crate::network::publication_graph::{RecommendationCount, publication_graph, recommendation_counts};

fn most_recommended(data: &Dataset) -> Option<RecommendationCount> {
	let (_, counts) = sample::publication_exports(RECOMMENDERS);
	let known = dataset::count_export_urls(&counts).unwrap_or_else(|err| {
		error!("failed to read subscriber count export: {err}");
		Vec::new()
	});
	recommendation_counts(&data.recommendations, &known).into_iter().next()
}

/// Every publication and recommendation as a force-directed network.
#[component]
pub fn PublicationNetwork() -> impl IntoView {
	let data = sample_dataset();
	let graph = publication_graph(&data.publications, &data.recommendations);
	let meta = graph.metadata;
	info!(
		"publication graph: {} nodes, {} links, {} bestsellers, {} with subscriber data",
		meta.total_nodes, meta.total_links, meta.bestsellers_count, meta.nodes_with_subscribers
	);
	let busiest = most_recommended(&data).map(|count| {
		format!(
			"Busiest: {} ({} in, {} out)",
			count.publication_url, count.incoming_recommendations, count.outgoing_recommendations
		)
	});

	let graph_data = graph.to_graph_data();
	let graph_data = Signal::derive(move || graph_data.clone());

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_data fullscreen=true />
			<div class="graph-overlay">
				<h1>"Publication network"</h1>
				<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
				<p class="subtitle">{busiest}</p>
			</div>
		</div>
	}
}
