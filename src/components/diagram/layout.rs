//! Layout configuration and initial node placement.
//!
//! Nodes are seeded in layers (longest path from the sources) so that
//! dependencies start out pointing downward, then the force simulation
//! relaxes the placement for a fixed number of ticks before it is frozen.

use std::collections::{HashMap, VecDeque};

use force_graph::SimulationParameters;

use super::elements::DiagramElements;

/// Fixed layout configuration handed to the graph engine.
#[derive(Clone, Debug)]
pub struct DiagramLayout {
	/// Vertical distance between layers, in world units.
	pub rank_spacing: f64,
	/// Horizontal distance between nodes of a layer, in world units.
	pub node_spacing: f64,
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Pull along each dependency.
	pub force_spring: f32,
	/// Cap on the force applied to a node per tick.
	pub force_max: f32,
	/// Cap on node velocity.
	pub node_speed: f32,
	/// Velocity kept from one tick to the next.
	pub damping_factor: f32,
	/// Simulation steps run before the layout is frozen.
	pub settle_ticks: usize,
	/// Time step of one settle tick, in seconds.
	pub tick_dt: f32,
	/// Screen-space margin kept around the diagram when fitting.
	pub fit_padding: f64,
}

impl Default for DiagramLayout {
	fn default() -> Self {
		Self {
			rank_spacing: 110.0,
			node_spacing: 170.0,
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			settle_ticks: 30,
			tick_dt: 0.016,
			fit_padding: 30.0,
		}
	}
}

impl DiagramLayout {
	/// Simulation parameters for `force_graph`.
	pub fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}

	/// Initial `(x, y)` for every node, indexed like `elements.nodes`.
	pub fn seed_positions(&self, elements: &DiagramElements) -> Vec<(f64, f64)> {
		let ranks = assign_ranks(elements);
		let mut positions = vec![(0.0, 0.0); ranks.len()];

		for (rank, bucket) in rank_buckets(&ranks).iter().enumerate() {
			let offset = (bucket.len() as f64 - 1.0) / 2.0;
			for (i, &node) in bucket.iter().enumerate() {
				positions[node] = (
					(i as f64 - offset) * self.node_spacing,
					rank as f64 * self.rank_spacing,
				);
			}
		}
		positions
	}
}

/// Longest-path layering over the known nodes.
///
/// Sources get rank 0 and every other node sits one below its deepest
/// predecessor. Nodes on or below a cycle cannot be ordered and all go one
/// rank below the deepest ordered node. Self-loops and edges to unknown
/// nodes are ignored.
pub fn assign_ranks(elements: &DiagramElements) -> Vec<usize> {
	let n = elements.nodes.len();
	let index: HashMap<&str, usize> = elements
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.as_str(), i))
		.collect();

	let mut successors = vec![Vec::new(); n];
	let mut in_degree = vec![0usize; n];
	for edge in &elements.edges {
		if let (Some(&src), Some(&tgt)) = (
			index.get(edge.source.as_str()),
			index.get(edge.target.as_str()),
		) {
			if src != tgt {
				successors[src].push(tgt);
				in_degree[tgt] += 1;
			}
		}
	}

	let mut ranks = vec![0usize; n];
	let mut ordered = vec![false; n];
	let mut queue: VecDeque<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
	while let Some(u) = queue.pop_front() {
		ordered[u] = true;
		for &v in &successors[u] {
			ranks[v] = ranks[v].max(ranks[u] + 1);
			in_degree[v] -= 1;
			if in_degree[v] == 0 {
				queue.push_back(v);
			}
		}
	}

	let unordered_rank = ranks
		.iter()
		.zip(&ordered)
		.filter(|(_, ordered)| **ordered)
		.map(|(rank, _)| *rank)
		.max()
		.map_or(0, |max| max + 1);
	for (rank, ordered) in ranks.iter_mut().zip(&ordered) {
		if !ordered {
			*rank = unordered_rank;
		}
	}
	ranks
}

fn rank_buckets(ranks: &[usize]) -> Vec<Vec<usize>> {
	let Some(&max_rank) = ranks.iter().max() else {
		return Vec::new();
	};
	let mut buckets = vec![Vec::new(); max_rank + 1];
	for (node, &rank) in ranks.iter().enumerate() {
		buckets[rank].push(node);
	}
	buckets
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::diagram::elements::{EdgeElement, NodeElement};

	fn elements(nodes: &[&str], edges: &[(&str, &str)]) -> DiagramElements {
		DiagramElements {
			nodes: nodes
				.iter()
				.map(|id| NodeElement {
					id: id.to_string(),
					size: None,
				})
				.collect(),
			edges: edges
				.iter()
				.map(|(s, t)| EdgeElement {
					source: s.to_string(),
					target: t.to_string(),
					strength: 1.0,
				})
				.collect(),
		}
	}

	#[test]
	fn ranks_follow_longest_path() {
		let els = elements(
			&["app", "service", "util", "model"],
			&[("app", "service"), ("service", "util"), ("app", "util"), ("service", "model")],
		);
		assert_eq!(assign_ranks(&els), vec![0, 1, 2, 2]);
	}

	#[test]
	fn cycle_members_go_below_ordered_nodes() {
		let els = elements(
			&["top", "a", "b", "lonely"],
			&[("top", "a"), ("a", "b"), ("b", "a")],
		);
		// "a" still waits on "b", so neither can be ordered
		assert_eq!(assign_ranks(&els), vec![0, 1, 1, 0]);
	}

	#[test]
	fn self_loops_and_dangling_edges_are_ignored() {
		let els = elements(&["a", "b"], &[("a", "a"), ("a", "ghost"), ("a", "b")]);
		assert_eq!(assign_ranks(&els), vec![0, 1]);
	}

	#[test]
	fn seeds_put_dependencies_below_dependents() {
		let layout = DiagramLayout::default();
		let els = elements(&["a", "b", "c"], &[("a", "b"), ("a", "c")]);
		let positions = layout.seed_positions(&els);

		assert!(positions[0].1 < positions[1].1);
		assert_eq!(positions[1].1, positions[2].1);
		// layer is centered around x = 0
		assert_eq!(positions[1].0, -positions[2].0);
		assert_eq!(positions[0].0, 0.0);
	}

	#[test]
	fn empty_elements_have_no_positions() {
		let layout = DiagramLayout::default();
		assert!(layout.seed_positions(&DiagramElements::default()).is_empty());
	}
}
