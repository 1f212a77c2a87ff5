use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const BACKGROUND: &str = "#10131f";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.view.x, state.view.y);
	let _ = ctx.scale(state.view.k, state.view.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.focus.fade);
	let focus = state.has_focus();
	let base_width = 1.0 / state.view.k;

	state.graph.visit_edges(|n1, n2, edge| {
		let touches_focus = focus && (state.is_focused(n1.index()) || state.is_focused(n2.index()));
		let (alpha, width) = match (focus, touches_focus) {
			(false, _) => (0.35, base_width),
			(true, true) => (0.35 + 0.55 * t, base_width * (1.0 + t)),
			(true, false) => (0.35 - 0.3 * t, base_width),
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&edge.user_data);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.focus.fade);
	let focus = state.has_focus();
	let k = state.view.k;
	let font = format!("{}px sans-serif", 10.0 / k.max(0.5));
	ctx.set_font(&font);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let emphasised = focus && state.is_emphasised(idx);
		let alpha = if focus && !emphasised { 1.0 - 0.75 * t } else { 1.0 };
		let radius = if focus && state.is_focused(idx) {
			info.radius * (1.0 + 0.35 * t)
		} else {
			info.radius
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, TAU);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if focus && state.is_focused(idx) && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, TAU);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		// Labels only when zoomed in or when part of the focused neighbourhood.
		if let Some(label) = &info.label {
			if emphasised || k >= 1.5 {
				ctx.set_fill_style_str("white");
				let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
			}
		}
	});
	ctx.set_global_alpha(1.0);
}
