use leptos::prelude::*;

use crate::components::weighted_edge::{GraphData, GraphLink, GraphNode, WeightedGraphCanvas};

/// Generate a small sample network: a ring with chords, weights spread over
/// several orders of magnitude so the grouped labels show.
fn generate_sample_data(n: usize) -> GraphData {
	let nodes: Vec<GraphNode> = (0..n)
		.map(|i| GraphNode {
			id: i.to_string(),
			label: Some(format!("Node {}", i)),
			color: None,
			group: Some((i % 10) as u32),
		})
		.collect();

	let mut links: Vec<GraphLink> = (0..n)
		.map(|i| GraphLink {
			source: i.to_string(),
			target: ((i + 1) % n).to_string(),
			weight: rand_weight(i),
		})
		.collect();
	links.extend((0..n).step_by(3).map(|i| GraphLink {
		source: i.to_string(),
		target: ((i + n / 2) % n).to_string(),
		weight: rand_weight(i + n),
	}));

	GraphData { nodes, links }
}

/// Simple pseudo-random weight (deterministic for consistency).
fn rand_weight(seed: usize) -> i32 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	let magnitude = 10_i32.pow((seed % 6) as u32);
	((x as f64 / 233280.0) * magnitude as f64 * 9.0) as i32 + 1
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(move || generate_sample_data(12));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<WeightedGraphCanvas data=graph_data fullscreen=true />
				<div class="graph-overlay">
					<h1>"Weighted Network"</h1>
					<p class="subtitle">
						"Click a node to send ConnectOKMsg on its outgoing edges. Drag nodes to reposition. Scroll to zoom."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_is_a_ring_with_chords() {
		let data = generate_sample_data(12);
		assert_eq!(data.nodes.len(), 12);
		assert_eq!(data.links.len(), 16);
		assert_eq!(data.links[11].target, "0");
		assert!(data.links.iter().all(|l| l.weight > 0));
	}
}
