use leptos::prelude::*;

use super::home::sample_dataset;
use crate::components::force_graph::ForceGraphCanvas;
use crate::network::force::force_graph_data;

/// Publications coloured by category instead of audience size.
#[component]
pub fn PublicationExplorer() -> impl IntoView {
	let data = sample_dataset();
	let graph_data = force_graph_data(&data.publications, &data.recommendations);
	let graph_data = Signal::derive(move || graph_data.clone());

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_data fullscreen=true />
			<div class="graph-overlay">
				<h1>"Publications by category"</h1>
				<p class="subtitle">"Bestsellers in orange, everything else in its category colour."</p>
			</div>
		</div>
	}
}
