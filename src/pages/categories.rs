use leptos::prelude::*;
use log::{error, info};

use super::sample;
use crate::components::force_graph::ForceGraphCanvas;
use crate::network::category::{CategoryGraph, CategoryRecommendations, CategoryStats, category_graph};

fn load_category_graph() -> Result<CategoryGraph, serde_json::Error> {
	let (recommendations, stats) = sample::category_exports();
	let recommendations: CategoryRecommendations = serde_json::from_str(&recommendations)?;
	let stats: Vec<CategoryStats> = serde_json::from_str(&stats)?;
	Ok(category_graph(&recommendations, &stats))
}

/// Categories as nodes, aggregated recommendations as links.
#[component]
pub fn CategoryNetwork() -> impl IntoView {
	let graph = load_category_graph().unwrap_or_else(|err| {
		error!("failed to load category export: {err}");
		CategoryGraph::default()
	});
	let meta = graph.metadata;
	info!(
		"category graph: {} nodes, {} links, {} recommendations",
		meta.total_nodes, meta.total_links, meta.total_recommendations
	);
	let graph_data = graph.to_graph_data();
	let graph_data = Signal::derive(move || graph_data.clone());

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_data fullscreen=true />
			<div class="graph-overlay">
				<h1>"Category network"</h1>
				<p class="subtitle">
					{format!("{} categories, {} category links", meta.total_nodes, meta.total_links)}
				</p>
			</div>
		</div>
	}
}
