use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::network::force::GraphData;

/// Radius of a node with size 1.
pub const BASE_RADIUS: f64 = 4.0;
/// Minimum pick radius around a node centre, in graph units.
pub const HIT_SLOP: f64 = 8.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub color: String,
	pub radius: f64,
}

/// Pan/zoom applied to graph coordinates.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

/// What the pointer is currently doing on the canvas.
#[derive(Clone, Debug, Default)]
pub enum Gesture {
	#[default]
	Idle,
	DragNode {
		idx: DefaultNodeIdx,
		origin: (f64, f64),
		node_origin: (f32, f32),
	},
	Pan {
		origin: (f64, f64),
		view_origin: (f64, f64),
	},
}

#[derive(Clone, Debug, Default)]
pub struct Focus {
	/// Node under the pointer.
	pub node: Option<DefaultNodeIdx>,
	/// Last focused node, kept until the fade-out completes.
	pub last: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	/// 0 = nothing emphasised, 1 = fully emphasised.
	pub fade: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, String>,
	pub view: ViewTransform,
	pub gesture: Gesture,
	pub focus: Focus,
	pub width: f64,
	pub height: f64,
	adjacency: HashMap<DefaultNodeIdx, HashSet<DefaultNodeIdx>>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut by_id = HashMap::new();
		let mut adjacency: HashMap<DefaultNodeIdx, HashSet<DefaultNodeIdx>> = HashMap::new();

		// Seed on a circle so the simulation starts untangled and repeatable.
		let count = data.nodes.len().max(1) as f64;
		let ring = 40.0 + 4.0 * count.sqrt();
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = i as f64 * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: (10.0 * node.size) as f32,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color: node.color.clone(),
					radius: BASE_RADIUS * node.size.cbrt(),
				},
			});
			by_id.insert(node.id.as_str(), idx);
		}

		let mut dropped = 0usize;
		for link in &data.links {
			match (by_id.get(link.source.as_str()), by_id.get(link.target.as_str())) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(
						src,
						tgt,
						EdgeData {
							user_data: link.color.clone(),
						},
					);
					adjacency.entry(src).or_default().insert(tgt);
					adjacency.entry(tgt).or_default().insert(src);
				}
				_ => dropped += 1,
			}
		}
		if dropped > 0 {
			log::debug!("force graph: {dropped} links without both endpoints skipped");
		}

		Self {
			graph,
			view: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			gesture: Gesture::Idle,
			focus: Focus::default(),
			width,
			height,
			adjacency,
		}
	}

	pub fn to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.view.x) / self.view.k, (sy - self.view.y) / self.view.k)
	}

	/// Topmost node under a screen point.
	pub fn pick(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let reach = node.data.user_data.radius.max(HIT_SLOP);
			if dx * dx + dy * dy < reach * reach {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut position = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				position = Some((node.x(), node.y()));
			}
		});
		position
	}

	/// Hold a node at `at` while dragging; `None` releases it to the simulation.
	pub fn pin_node(&mut self, idx: DefaultNodeIdx, at: Option<(f32, f32)>) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				if let Some((x, y)) = at {
					node.data.x = x;
					node.data.y = y;
				}
				node.data.is_anchor = at.is_some();
			}
		});
	}

	/// Emphasise `node` and its direct neighbours. The previous neighbourhood
	/// stays emphasised while the fade runs out.
	pub fn set_focus(&mut self, node: Option<DefaultNodeIdx>) {
		if self.focus.node == node {
			return;
		}
		self.focus.node = node;
		if let Some(idx) = node {
			self.focus.last = Some(idx);
			self.focus.neighbors = self.adjacency.get(&idx).cloned().unwrap_or_default();
		}
	}

	pub fn has_focus(&self) -> bool {
		self.focus.last.is_some()
	}

	pub fn is_focused(&self, idx: DefaultNodeIdx) -> bool {
		self.focus.last == Some(idx)
	}

	pub fn is_emphasised(&self, idx: DefaultNodeIdx) -> bool {
		self.is_focused(idx) || self.focus.neighbors.contains(&idx)
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		let target = if self.focus.node.is_some() { 1.0 } else { 0.0 };
		self.focus.fade += (target - self.focus.fade) * 1.5 * dt as f64;
		if self.focus.node.is_none() && self.focus.fade < 0.01 {
			self.focus = Focus::default();
		}
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let k = (self.view.k * factor).clamp(0.1, 10.0);
		let ratio = k / self.view.k;
		self.view.x = sx - (sx - self.view.x) * ratio;
		self.view.y = sy - (sy - self.view.y) * ratio;
		self.view.k = k;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
