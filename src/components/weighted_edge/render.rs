use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::edge::{EdgeCanvas, EdgeFrame, ScreenTransform};
use super::geometry::ScreenPoint;
use super::state::{EdgeGraphState, NODE_RADIUS};
use super::style::EdgeStyle;

const BACKGROUND: &str = "#f4f4ef";

impl EdgeCanvas for CanvasRenderingContext2d {
	fn set_color(&self, color: &str) {
		self.set_fill_style_str(color);
	}

	fn fill_polygon(&self, points: &[ScreenPoint]) {
		let Some((first, rest)) = points.split_first() else {
			return;
		};
		self.begin_path();
		self.move_to(first.x, first.y);
		for p in rest {
			self.line_to(p.x, p.y);
		}
		self.close_path();
		self.fill();
	}

	fn draw_text(&self, text: &str, at: ScreenPoint) {
		let _ = self.fill_text(text, at.x, at.y);
	}
}

pub fn render(state: &mut EdgeGraphState, ctx: &CanvasRenderingContext2d, style: &EdgeStyle) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.set_font(&style.font);
	draw_edges(state, ctx, style);
	draw_nodes(state, ctx);
	draw_tooltip(state, ctx);
}

fn draw_edges(state: &mut EdgeGraphState, ctx: &CanvasRenderingContext2d, style: &EdgeStyle) {
	let positions = state.positions();
	let transform = &state.transform;
	ctx.set_line_width(1.5);

	for (i, slot) in state.edges.iter_mut().enumerate() {
		let (Some(&from), Some(&to)) = (positions.get(&slot.source), positions.get(&slot.target))
		else {
			continue;
		};
		let color = if state.hover.edge == Some(i) {
			&style.highlight_color
		} else {
			&style.edge_color
		};

		let (a, b) = (transform.to_screen(from.0, from.1), transform.to_screen(to.0, to.1));
		ctx.set_stroke_style_str(color);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();

		slot.edge.draw(
			ctx,
			transform,
			EdgeFrame {
				from,
				to,
				messages_on_edge: slot.in_flight,
				color,
			},
			style,
		);
	}
}

fn draw_nodes(state: &EdgeGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let radius = NODE_RADIUS * k;

	state.graph.visit_nodes(|node| {
		let p = state.transform.to_screen(node.x() as f64, node.y() as f64);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();

		let info = &node.data.user_data;
		let label = info.label.as_deref().unwrap_or(&info.id);
		ctx.set_fill_style_str("#222222");
		let _ = ctx.fill_text(label, p.x + radius + 3.0, p.y - radius);
	});
}

fn draw_tooltip(state: &EdgeGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(slot) = state.hover.edge.and_then(|i| state.edges.get(i)) else {
		return;
	};
	let text = slot.edge.to_string();
	let (x, y) = (state.hover.x + 12.0, state.hover.y + 18.0);
	let width = ctx
		.measure_text(&text)
		.map(|m| m.width())
		.unwrap_or(text.len() as f64 * 7.0);

	ctx.set_fill_style_str("rgba(255, 255, 224, 0.95)");
	ctx.fill_rect(x - 4.0, y - 13.0, width + 8.0, 18.0);
	ctx.set_stroke_style_str("#888888");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x - 4.0, y - 13.0, width + 8.0, 18.0);
	ctx.set_fill_style_str("black");
	let _ = ctx.fill_text(&text, x, y);
}
