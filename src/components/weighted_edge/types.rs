#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	pub color: Option<String>,
	pub group: Option<u32>,
}

/// A directed link from `source` to `target`.
#[derive(Clone, Debug)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub weight: i32,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
