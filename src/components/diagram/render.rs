//! Canvas rendering for the diagram.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Hushed edges, then the remaining edges (world space)
//! 3. Hushed nodes, the remaining nodes, then the hovered node on top

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::classes::ElementClass;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{DiagramEdge, DiagramNode, DiagramState};
use super::style::DiagramStyle;

type Positions = HashMap<DefaultNodeIdx, (f64, f64)>;

/// Measures every node label with the current font and stores the
/// resulting box size on the state.
pub fn measure(state: &mut DiagramState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, style: &DiagramStyle) {
	let scale = ScaledValues::new(config, state.transform.k);
	let labels: Vec<_> = state
		.nodes()
		.iter()
		.map(|node| (node.idx, node.id.clone(), node.size))
		.collect();

	for (idx, label, size) in labels {
		ctx.set_font(&scale.label_font(size, style.node.font_family));
		let Ok(metrics) = ctx.measure_text(&label) else {
			continue;
		};
		let half_width = metrics.width() / 2.0 + config.node.padding_x;
		let half_height = scale.font_size(size) / 2.0 + config.node.padding_y;
		state.set_half_extent(idx, half_width, half_height);
	}
}

/// Renders the complete diagram to the canvas.
pub fn render(state: &DiagramState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, style: &DiagramStyle) {
	let scale = ScaledValues::new(config, state.transform.k);
	let positions = state.positions();

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	for hushed in [true, false] {
		for edge in state.edges() {
			if edge.classes.has(ElementClass::Hushed) == hushed {
				draw_edge(state, ctx, config, &scale, style, &positions, edge);
			}
		}
	}

	for hushed in [true, false] {
		for node in state.nodes() {
			if node.classes.has(ElementClass::Hushed) == hushed && Some(node.idx) != state.hovered() {
				draw_node(ctx, config, &scale, style, &positions, node);
			}
		}
	}
	if let Some(node) = state.hovered().and_then(|idx| state.node(idx)) {
		draw_node(ctx, config, &scale, style, &positions, node);
	}

	ctx.restore();
}

/// Distance from a box center to its border along the unit direction `(ux, uy)`.
fn box_exit(half_width: f64, half_height: f64, ux: f64, uy: f64) -> f64 {
	let tx = if ux.abs() > 1e-9 { half_width / ux.abs() } else { f64::INFINITY };
	let ty = if uy.abs() > 1e-9 { half_height / uy.abs() } else { f64::INFINITY };
	tx.min(ty)
}

#[allow(clippy::too_many_arguments)]
fn draw_edge(
	state: &DiagramState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	style: &DiagramStyle,
	positions: &Positions,
	edge: &DiagramEdge,
) {
	let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&edge.source), positions.get(&edge.target)) else {
		return;
	};
	let color = style.edge_color(&edge.classes).to_css();
	let width = scale.edge_width(edge.strength);
	ctx.set_stroke_style_str(&color);
	ctx.set_fill_style_str(&color);
	ctx.set_line_width(width);

	let (shw, shh) = extent(state, config, edge.source);
	if edge.source == edge.target {
		draw_self_loop(ctx, scale, x1, y1, shw, shh);
		return;
	}

	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let (thw, thh) = extent(state, config, edge.target);
	let start = box_exit(shw, shh, ux, uy);
	let end = box_exit(thw, thh, ux, uy);
	if start + end + scale.arrow_size >= dist {
		return;
	}

	ctx.begin_path();
	ctx.move_to(x1 + ux * start, y1 + uy * start);
	ctx.line_to(
		x2 - ux * (end + scale.arrow_size),
		y2 - uy * (end + scale.arrow_size),
	);
	ctx.stroke();

	let (tip_x, tip_y) = (x2 - ux * end, y2 - uy * end);
	draw_arrow(ctx, scale, tip_x, tip_y, ux, uy, width);
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, scale: &ScaledValues, tip_x: f64, tip_y: f64, ux: f64, uy: f64, line_width: f64) {
	let size = scale.arrow_size.max(line_width * 1.5);
	let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_self_loop(ctx: &CanvasRenderingContext2d, scale: &ScaledValues, x: f64, y: f64, half_width: f64, half_height: f64) {
	let radius = half_height.max(8.0);
	let (cx, cy) = (x + half_width, y - half_height);
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, radius, PI, PI * 2.5);
	ctx.stroke();
	// lands on the right border, pointing left
	draw_arrow(ctx, scale, x + half_width, cy + radius, -1.0, 0.0, 1.0);
}

fn extent(state: &DiagramState, config: &ScaleConfig, idx: DefaultNodeIdx) -> (f64, f64) {
	state
		.node(idx)
		.map(|node| node.extent_or(config))
		.unwrap_or((config.node.fallback_half_width, config.node.font_size))
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	style: &DiagramStyle,
	positions: &Positions,
	node: &DiagramNode,
) {
	let Some(&(x, y)) = positions.get(&node.idx) else {
		return;
	};
	let (hw, hh) = node.extent_or(config);
	let alpha = style.alpha(&node.classes);

	rounded_rect(ctx, x - hw, y - hh, hw * 2.0, hh * 2.0, style.node.corner_radius);
	ctx.set_fill_style_str(&style.node_fill(&node.classes).to_css());
	ctx.fill();

	let border = if node.classes.has(ElementClass::Hushed) {
		style.node.border.lighten(0.6)
	} else {
		style.node.border
	};
	ctx.set_stroke_style_str(&border.with_alpha(alpha).to_css());
	ctx.set_line_width(style.node.border_width / scale.k.max(0.5));
	ctx.stroke();

	if node.classes.has(ElementClass::Highlight) {
		let offset = scale.outline_width * 1.5;
		rounded_rect(
			ctx,
			x - hw - offset,
			y - hh - offset,
			(hw + offset) * 2.0,
			(hh + offset) * 2.0,
			style.node.corner_radius + offset,
		);
		ctx.set_stroke_style_str(&style.node.border.to_css());
		ctx.set_line_width(scale.outline_width);
		ctx.stroke();
	}

	ctx.set_font(&scale.label_font(node.size, style.node.font_family));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(&style.node.label.with_alpha(alpha).to_css());
	let _ = ctx.fill_text(&node.id, x, y);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	let _ = ctx.quadratic_curve_to(x + w, y, x + w, y + r);
	ctx.line_to(x + w, y + h - r);
	let _ = ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
	ctx.line_to(x + r, y + h);
	let _ = ctx.quadratic_curve_to(x, y + h, x, y + h - r);
	ctx.line_to(x, y + r);
	let _ = ctx.quadratic_curve_to(x, y, x + r, y);
	ctx.close_path();
}
