use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{ForceGraphState, Gesture};
use crate::network::force::GraphData;

type Shared<T> = Rc<RefCell<Option<T>>>;

const FRAME_DT: f32 = 0.016;

/// Canvas-relative position of a mouse event.
fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Size to draw at: explicit props, then the viewport or parent, then 800×600.
fn canvas_size(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		if let Some(size) = viewport_size() {
			return size;
		}
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| parent.as_ref().map_or(800.0, |p| p.client_width() as f64)),
		height.unwrap_or_else(|| parent.as_ref().map_or(600.0, |p| p.client_height() as f64)),
	)
}

fn viewport_size() -> Option<(f64, f64)> {
	let window = web_sys::window()?;
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn request_frame(cb: &Closure<dyn FnMut()>) {
	if let Some(window) = web_sys::window() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Force-directed canvas. Layout is simulated by `force_graph`; this component
/// only drives the clock, draws and handles pan, zoom, drag and hover.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<ForceGraphState> = Rc::new(RefCell::new(None));
	let frame: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let on_resize: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));

	let (state_init, frame_init, resize_init) = (state.clone(), frame.clone(), on_resize.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = canvas_size(&canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("force graph: 2d canvas context unavailable");
			return;
		};

		let graph = data.get();
		log::info!(
			"force graph: {} nodes, {} links",
			graph.nodes.len(),
			graph.links.len()
		);
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph, w, h));

		if fullscreen && resize_init.borrow().is_none() {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			let cb = Closure::<dyn FnMut()>::new(move || {
				let Some((nw, nh)) = viewport_size() else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(s) = state_resize.borrow_mut().as_mut() {
					s.resize(nw, nh);
				}
			});
			if let Some(window) = web_sys::window() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			*resize_init.borrow_mut() = Some(cb);
		}

		if frame_init.borrow().is_some() {
			return;
		}
		let (state_frame, frame_next) = (state_init.clone(), frame_init.clone());
		*frame_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(s) = state_frame.borrow_mut().as_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			}
			if let Some(cb) = frame_next.borrow().as_ref() {
				request_frame(cb);
			}
		}));
		if let Some(cb) = frame_init.borrow().as_ref() {
			request_frame(cb);
		}
	});

	let state_down = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(s) = state_down.borrow_mut().as_mut() {
			s.gesture = match s.pick(x, y) {
				Some(idx) => Gesture::DragNode {
					idx,
					origin: (x, y),
					node_origin: s.node_position(idx).unwrap_or_default(),
				},
				None => Gesture::Pan {
					origin: (x, y),
					view_origin: (s.view.x, s.view.y),
				},
			};
		}
	};

	let state_move = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let mut guard = state_move.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		match s.gesture.clone() {
			Gesture::Idle => {
				let hovered = s.pick(x, y);
				s.set_focus(hovered);
			}
			Gesture::DragNode {
				idx,
				origin,
				node_origin,
			} => {
				let k = s.view.k;
				let at = (
					node_origin.0 + ((x - origin.0) / k) as f32,
					node_origin.1 + ((y - origin.1) / k) as f32,
				);
				s.pin_node(idx, Some(at));
			}
			Gesture::Pan {
				origin,
				view_origin,
			} => {
				s.view.x = view_origin.0 + (x - origin.0);
				s.view.y = view_origin.1 + (y - origin.1);
			}
		}
	};

	let state_up = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(s) = state_up.borrow_mut().as_mut() {
			if let Gesture::DragNode { idx, .. } = s.gesture {
				s.pin_node(idx, None);
			}
			s.gesture = Gesture::Idle;
		}
	};

	let state_leave = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(s) = state_leave.borrow_mut().as_mut() {
			s.gesture = Gesture::Idle;
			s.set_focus(None);
		}
	};

	let state_wheel = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(s) = state_wheel.borrow_mut().as_mut() {
			s.zoom_at(x, y, if ev.delta_y() > 0.0 { 0.9 } else { 1.1 });
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
