use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::info;

use super::edge::{EdgeDisplay, ScreenTransform, WeightedEdge};
use super::geometry::{self, ScreenPoint};
use super::message::Message;
use super::types::GraphData;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Screen pixels within which the cursor counts as over an edge.
pub const EDGE_HIT_DISTANCE: f64 = 4.0;
/// Seconds between simulation rounds.
pub const ROUND_SECONDS: f64 = 1.0;
/// Pointer travel, in pixels, below which a press on a node is a click.
pub const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zooms by `factor` around the screen point (`sx`, `sy`), keeping that
	/// point fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

impl ScreenTransform for ViewTransform {
	fn to_screen(&self, x: f64, y: f64) -> ScreenPoint {
		ScreenPoint::new(x * self.k + self.x, y * self.k + self.y)
	}

	fn zoom_factor(&self) -> f64 {
		self.k
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub edge: Option<usize>,
	pub x: f64,
	pub y: f64,
}

/// An edge together with its endpoints in the layout and the number of
/// messages placed on it during the current round.
#[derive(Clone, Debug)]
pub struct EdgeSlot {
	pub edge: WeightedEdge,
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub in_flight: u32,
}

pub struct EdgeGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeSlot>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub round: u64,
	round_time: f64,
}

impl EdgeGraphState {
	pub fn new(data: &GraphData, display: EdgeDisplay, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 400.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let color = node.color.clone().unwrap_or_else(|| {
				node.group
					.map(|g| COLORS[g as usize % COLORS.len()].into())
					.unwrap_or(COLORS[0].into())
			});
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;

			let idx = graph.add_node(NodeData {
				x: (150.0 * angle.cos()) as f32,
				y: (150.0 * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push(EdgeSlot {
					edge: WeightedEdge::new(&link.source, &link.target, link.weight, display),
					source: src,
					target: tgt,
					in_flight: 0,
				});
			}
		}
		info!("graph built: {} nodes, {} edges", data.nodes.len(), edges.len());

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			round: 0,
			round_time: 0.0,
		}
	}

	/// World positions of every node, keyed by index.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::new();
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.transform.to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Index of the edge closest to the screen point, if any lies within
	/// `EDGE_HIT_DISTANCE`.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let positions = self.positions();
		let cursor = ScreenPoint::new(sx, sy);
		self.edges
			.iter()
			.enumerate()
			.filter_map(|(i, slot)| {
				let (x1, y1) = positions.get(&slot.source)?;
				let (x2, y2) = positions.get(&slot.target)?;
				let a = self.transform.to_screen(*x1, *y1);
				let b = self.transform.to_screen(*x2, *y2);
				let d = geometry::distance_to_segment(cursor, a, b);
				(d < EDGE_HIT_DISTANCE).then_some((i, d))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| i)
	}

	pub fn set_hover(&mut self, edge: Option<usize>, sx: f64, sy: f64) {
		self.hover = HoverState { edge, x: sx, y: sy };
	}

	/// Puts `msg` on every edge leaving `node` for the current round.
	pub fn send_from(&mut self, node: DefaultNodeIdx, msg: &dyn Message) -> usize {
		let mut sent = 0;
		for slot in self.edges.iter_mut().filter(|slot| slot.source == node) {
			slot.in_flight += 1;
			slot.edge.attach(msg);
			sent += 1;
		}
		info!("round {}: sent {} on {} edge(s)", self.round, msg, sent);
		sent
	}

	/// Starts a new round: every message placed during the last one has been
	/// delivered.
	pub fn advance_round(&mut self) {
		self.round += 1;
		for slot in &mut self.edges {
			slot.in_flight = 0;
		}
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.round_time += dt as f64;
		if self.round_time >= ROUND_SECONDS {
			self.round_time -= ROUND_SECONDS;
			self.advance_round();
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::weighted_edge::message::ConnectOk;
	use crate::components::weighted_edge::types::{GraphLink, GraphNode};

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: None,
			color: None,
			group: None,
		}
	}

	fn link(source: &str, target: &str, weight: i32) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			weight,
		}
	}

	fn sample() -> EdgeGraphState {
		let data = GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			links: vec![link("a", "b", 10), link("a", "c", 20), link("b", "c", 30), link("a", "z", 1)],
		};
		EdgeGraphState::new(&data, EdgeDisplay::default(), 800.0, 600.0)
	}

	#[test]
	fn view_transform_round_trips() {
		let t = ViewTransform { x: 40.0, y: -10.0, k: 2.0 };
		let p = t.to_screen(5.0, 7.5);
		assert_eq!(p, ScreenPoint::new(50.0, 5.0));
		assert_eq!(t.to_graph(p.x, p.y), (5.0, 7.5));
		assert_eq!(t.zoom_factor(), 2.0);
	}

	#[test]
	fn zoom_keeps_cursor_fixed() {
		let mut t = ViewTransform::default();
		let before = t.to_graph(100.0, 50.0);
		t.zoom_at(100.0, 50.0, 2.0);
		assert_eq!(t.k, 2.0);
		assert_eq!(t.to_graph(100.0, 50.0), before);

		t.zoom_at(0.0, 0.0, 100.0);
		assert_eq!(t.k, 10.0);
	}

	#[test]
	fn links_to_unknown_nodes_are_skipped() {
		let state = sample();
		assert_eq!(state.edges.len(), 3);
		assert_eq!(state.edges[2].edge.to_string(), "WeightedEdge(30, b, c)");
	}

	#[test]
	fn send_marks_outgoing_edges_until_next_round() {
		let mut state = sample();
		let a = state.edges[0].source;
		assert_eq!(state.send_from(a, &ConnectOk), 2);

		let in_flight: Vec<u32> = state.edges.iter().map(|slot| slot.in_flight).collect();
		assert_eq!(in_flight, vec![1, 1, 0]);
		assert_eq!(state.edges[0].edge.message_label(), "ConnectOKMsg");
		assert_eq!(state.edges[2].edge.message_label(), "");

		state.advance_round();
		assert_eq!(state.round, 1);
		assert!(state.edges.iter().all(|slot| slot.in_flight == 0));
	}

	#[test]
	fn edge_hit_test_uses_screen_space() {
		let mut state = sample();
		state.transform = ViewTransform::default();
		let positions = state.positions();
		let slot = &state.edges[2];
		let (x1, y1) = positions[&slot.source];
		let (x2, y2) = positions[&slot.target];
		let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);

		assert_eq!(state.edge_at_position(mx, my), Some(2));
		assert_eq!(state.edge_at_position(mx + 500.0, my + 500.0), None);
	}
}
