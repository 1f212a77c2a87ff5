use leptos::prelude::*;
use log::{debug, error, info};

use super::sample;
use crate::components::bipartite_graph::BipartiteGraph;
use crate::network::dataset::{self, Dataset};
use crate::network::{Dimensions, NetworkGraph, build_graph, calculate_edge_statistics};

pub(super) const RECOMMENDERS: usize = 14;

/// Sample exports joined into publication and recommendation records.
pub fn sample_dataset() -> Dataset {
	let (recommendations, counts) = sample::publication_exports(RECOMMENDERS);
	dataset::assemble(&recommendations, &counts).unwrap_or_else(|err| {
		error!("failed to assemble sample dataset: {err}");
		Dataset::default()
	})
}

fn recommendation_map(dims: Dimensions) -> NetworkGraph {
	let data = sample_dataset();
	let graph = build_graph(&data.publications, &data.recommendations, dims);
	let dropped = data.recommendations.len() - graph.edges.len();
	if dropped > 0 {
		debug!("{dropped} recommendations without placed endpoints");
	}
	let stats = calculate_edge_statistics(&graph.edges);
	info!(
		"recommendation map: {} nodes, {} edges, max {} connections per node",
		graph.nodes.len(),
		stats.total_edges,
		stats.max_connections_per_node
	);
	graph
}

/// Bipartite recommendation map.
#[component]
pub fn Home() -> impl IntoView {
	let dims = Dimensions::new(960.0, 640.0);
	let graph = recommendation_map(dims);
	let graph = Signal::derive(move || graph.clone());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Could not draw the recommendation map"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="recommendation-map">
				<div class="graph-overlay">
					<h1>"Who recommends whom"</h1>
					<p class="subtitle">
						"Bestsellers on the left, the publications they recommend on the right. Hover a publication to trace its links."
					</p>
				</div>
				<BipartiteGraph graph=graph dims=dims />
			</div>
		</ErrorBoundary>
	}
}
