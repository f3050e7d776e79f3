use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{EdgeSprite, LINK_COLOR, NodeGlyph, Scene};
use super::state::TopologyState;
use super::types::Severity;

const BACKGROUND: &str = "#0b1120";
const SURFACE: &str = "#1e293b";
const GRID_COLOR: &str = "rgba(37, 192, 244, 0.08)";
const GRID_STEP: f64 = 60.0;
const GLOW_BLUR: f64 = 8.0;
const BADGE_RADIUS: f64 = 6.0;

pub fn render(state: &TopologyState, scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width(), state.height());
	draw_grid(state, ctx);
	for edge in &scene.edges {
		draw_edge(state, edge, ctx);
	}
	for node in &scene.nodes {
		draw_node(state, node, ctx);
	}
}

fn draw_grid(state: &TopologyState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(GRID_COLOR);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	let mut x = 0.0;
	while x <= state.width() {
		ctx.move_to(x, 0.0);
		ctx.line_to(x, state.height());
		x += GRID_STEP;
	}
	let mut y = 0.0;
	while y <= state.height() {
		ctx.move_to(0.0, y);
		ctx.line_to(state.width(), y);
		y += GRID_STEP;
	}
	ctx.stroke();
}

fn draw_edge(state: &TopologyState, edge: &EdgeSprite, ctx: &CanvasRenderingContext2d) {
	let (x1, y1) = edge.from.to_screen(state.width(), state.height());
	let (x2, y2) = edge.to.to_screen(state.width(), state.height());
	let (ex, ey) = edge
		.from
		.lerp(edge.to, edge.stroke.reveal)
		.to_screen(state.width(), state.height());

	ctx.save();
	ctx.set_global_alpha(edge.stroke.opacity);
	ctx.set_line_width(edge.stroke.width);
	let gradient = ctx.create_linear_gradient(x1, y1, x2, y2);
	let _ = gradient.add_color_stop(0.0, edge.gradient[0]);
	let _ = gradient.add_color_stop(1.0, edge.gradient[1]);
	#[allow(deprecated)]
	ctx.set_stroke_style(&gradient);
	if edge.glow {
		ctx.set_shadow_blur(GLOW_BLUR);
		ctx.set_shadow_color(edge.gradient[1]);
	}
	if let Some(dash) = edge.stroke.dash {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash.on),
			&JsValue::from_f64(dash.off),
		));
		ctx.set_line_dash_offset(dash.offset);
	}
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(ex, ey);
	ctx.stroke();
	ctx.restore();

	// Decals only start once the line has fully drawn in.
	if let Some(decal) = edge.decal.filter(|_| edge.stroke.reveal >= 1.0) {
		let (dx, dy) = decal.position.to_screen(state.width(), state.height());
		ctx.save();
		ctx.set_shadow_blur(GLOW_BLUR);
		ctx.set_shadow_color("white");
		ctx.set_fill_style_str("#ffffff");
		ctx.begin_path();
		let _ = ctx.arc(dx, dy, decal.radius, 0.0, 2.0 * PI);
		ctx.fill();
		ctx.restore();
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_node(state: &TopologyState, node: &NodeGlyph, ctx: &CanvasRenderingContext2d) {
	if node.reveal <= 0.0 {
		return;
	}
	let (x, y) = node.position.to_screen(state.width(), state.height());
	let size = node.size * node.scale * (0.5 + 0.5 * node.reveal);
	let half = size / 2.0;
	let accent = if node.severity.is_alert() {
		node.severity.color()
	} else {
		LINK_COLOR
	};

	ctx.save();
	ctx.set_global_alpha(node.reveal);

	ctx.set_shadow_blur(GLOW_BLUR * 2.0);
	ctx.set_shadow_color(accent);
	rounded_rect(ctx, x - half, y - half, size, size, size / 4.0);
	ctx.set_fill_style_str(SURFACE);
	ctx.fill();
	ctx.set_shadow_blur(0.0);
	ctx.set_line_width(1.0);
	ctx.set_stroke_style_str(accent);
	ctx.stroke();

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(accent);
	ctx.set_font(&format!("{}px sans-serif", size * 0.45));
	let _ = ctx.fill_text(node.icon.glyph(), x, y);

	if node.badge {
		draw_badge(state, node.severity, node.reveal, (x + half, y - half), ctx);
		ctx.set_global_alpha(node.reveal);
	}

	ctx.set_text_baseline("top");
	ctx.set_fill_style_str("white");
	ctx.set_font("bold 13px sans-serif");
	let _ = ctx.fill_text(&node.name, x, y + half + 10.0);
	ctx.set_fill_style_str(if node.severity.is_alert() { accent } else { "#94a3b8" });
	ctx.set_font("10px monospace");
	let _ = ctx.fill_text(&node.caption, x, y + half + 28.0);

	ctx.restore();
}

fn draw_badge(
	state: &TopologyState,
	severity: Severity,
	alpha: f64,
	(x, y): (f64, f64),
	ctx: &CanvasRenderingContext2d,
) {
	let ping = state.elapsed().fract();
	ctx.set_fill_style_str(severity.color());
	ctx.set_global_alpha(alpha * 0.75 * (1.0 - ping));
	ctx.begin_path();
	let _ = ctx.arc(x, y, BADGE_RADIUS * (1.0 + ping), 0.0, 2.0 * PI);
	ctx.fill();

	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, BADGE_RADIUS, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.set_stroke_style_str(SURFACE);
	ctx.set_line_width(2.0);
	ctx.stroke();
}
