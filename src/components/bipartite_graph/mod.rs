//! SVG rendering of the bipartite recommendation map.

use leptos::prelude::*;

use crate::network::{
	Dimensions, Edge, EdgeStatistics, NetworkGraph, NodeGroup, ProcessedNode, Side, TOP_MARGIN,
	calculate_edge_statistics,
};

const NODE_RADIUS: f64 = 6.0;
const LABEL_OFFSET: f64 = 10.0;

fn group_color(group: NodeGroup) -> &'static str {
	match group {
		NodeGroup::Bestseller => "#ff6b35",
		NodeGroup::RecommendationOnly => "#4ecdc4",
		NodeGroup::DualRole => "#9b59b6",
	}
}

/// Fixed-step stacking can run past the requested height; grow the drawing to fit.
fn drawing_height(graph: &NetworkGraph, dims: Dimensions) -> f64 {
	graph
		.nodes
		.iter()
		.map(|node| node.y + TOP_MARGIN)
		.fold(dims.height, f64::max)
}

fn edge_view(edge: &Edge, hovered: RwSignal<Option<String>>) -> impl IntoView + use<> {
	let (source, target, strength) = (edge.source.id.clone(), edge.target.id.clone(), edge.strength);
	let lit = move || {
		hovered.with(|h| match h {
			Some(id) => *id == source || *id == target,
			None => true,
		})
	};
	let lit_opacity = lit.clone();

	view! {
		<path
			class="edge"
			d=edge.path.to_string()
			fill="none"
			stroke="#64b4ff"
			stroke-width=move || if lit() { (1.0 + 2.0 * strength).to_string() } else { "1".to_string() }
			stroke-opacity=move || {
				if lit_opacity() { strength.to_string() } else { (strength * 0.15).to_string() }
			}
		/>
	}
}

fn node_view(node: &ProcessedNode, hovered: RwSignal<Option<String>>) -> impl IntoView + use<> {
	let (enter_id, label) = (node.id.clone(), node.name.clone());
	let (label_x, anchor) = match node.side {
		Side::Left => (node.x - LABEL_OFFSET, "end"),
		Side::Right => (node.x + LABEL_OFFSET, "start"),
	};

	view! {
		<g class="node" data-group=node.group.as_str()>
			<circle
				cx=node.x.to_string()
				cy=node.y.to_string()
				r=NODE_RADIUS.to_string()
				fill=group_color(node.group)
				on:mouseenter=move |_| hovered.set(Some(enter_id.clone()))
				on:mouseleave=move |_| hovered.set(None)
			/>
			<text
				x=label_x.to_string()
				y=(node.y + 4.0).to_string()
				text-anchor=anchor
				font-size="11"
				fill="currentColor"
			>
				{label}
			</text>
		</g>
	}
}

fn stats_view(stats: EdgeStatistics) -> impl IntoView {
	// The mean is NaN for an empty edge set.
	let average = if stats.total_edges == 0 {
		"–".to_string()
	} else {
		format!("{:.2}", stats.average_strength)
	};
	view! {
		<dl class="edge-stats">
			<dt>"Recommendations"</dt>
			<dd>{stats.total_edges}</dd>
			<dt>"Average strength"</dt>
			<dd>{average}</dd>
			<dt>"Most connections"</dt>
			<dd>{stats.max_connections_per_node}</dd>
			<dt>"Publications with several links"</dt>
			<dd>{stats.nodes_with_multiple_connections}</dd>
		</dl>
	}
}

/// Two-column layout: bestsellers left, recommended publications right, curved
/// edges between. Hovering a node brings its edges forward.
#[component]
pub fn BipartiteGraph(
	#[prop(into)] graph: Signal<NetworkGraph>,
	#[prop(default = Dimensions::default())] dims: Dimensions,
) -> impl IntoView {
	let hovered = RwSignal::new(None::<String>);
	let height = move || graph.with(|g| drawing_height(g, dims)).to_string();
	let view_box = move || graph.with(|g| format!("0 0 {} {}", dims.width, drawing_height(g, dims)));

	view! {
		<div class="bipartite-graph">
			<svg width=dims.width.to_string() height=height viewBox=view_box>
				<g class="edges">
					{move || graph.with(|g| g.edges.iter().map(|edge| edge_view(edge, hovered)).collect_view())}
				</g>
				<g class="nodes">
					{move || graph.with(|g| g.nodes.iter().map(|node| node_view(node, hovered)).collect_view())}
				</g>
			</svg>
			{move || graph.with(|g| stats_view(calculate_edge_statistics(&g.edges)))}
		</div>
	}
}
