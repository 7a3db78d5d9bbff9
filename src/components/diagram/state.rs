//! The live graph instance behind a rendered diagram.
//!
//! Wraps the `force_graph` simulation, which owns node positions, with
//! per-element class lists, the view transform for pan/zoom, and the
//! handlers that keep violation and hover classes in sync with user input.

use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::{debug, warn};

use super::classes::{ClassList, ElementClass};
use super::elements::DiagramElements;
use super::layout::DiagramLayout;
use super::scale::{ScaleConfig, ZoomConfig};

/// Per-node data attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Component name.
	pub label: String,
	/// Relative component size, 0.0 when unknown.
	pub size: f64,
}

/// Pan and zoom transform applied to the entire diagram.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal screen offset of the world origin.
	pub x: f64,
	/// Vertical screen offset of the world origin.
	pub y: f64,
	/// Zoom factor, clamped to the configured zoom limits.
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A drag is in progress.
	pub active: bool,
	/// The dragged node.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Screen point where the drag started.
	pub start_x: f64,
	/// Screen point where the drag started.
	pub start_y: f64,
	/// World position of the node when the drag started.
	pub node_start_x: f32,
	/// World position of the node when the drag started.
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// A pan is in progress.
	pub active: bool,
	/// Screen point where the pan started.
	pub start_x: f64,
	/// Screen point where the pan started.
	pub start_y: f64,
	/// Transform offset when the pan started.
	pub transform_start_x: f64,
	/// Transform offset when the pan started.
	pub transform_start_y: f64,
}

/// A component node and its classes.
#[derive(Clone, Debug)]
pub struct DiagramNode {
	/// Index in the engine graph.
	pub idx: DefaultNodeIdx,
	/// Component name.
	pub id: String,
	/// Relative component size, 0.0 when unknown.
	pub size: f64,
	/// Current classes.
	pub classes: ClassList,
	/// Measured half width and height of the label box, in world units.
	pub half_extent: Option<(f64, f64)>,
}

impl DiagramNode {
	/// Measured label box, or the configured fallback before measuring.
	pub fn extent_or(&self, config: &ScaleConfig) -> (f64, f64) {
		self.half_extent
			.unwrap_or((config.node.fallback_half_width, config.node.font_size))
	}
}

/// A dependency edge between two known nodes, and its classes.
#[derive(Clone, Debug)]
pub struct DiagramEdge {
	/// Depending node.
	pub source: DefaultNodeIdx,
	/// Node depended upon.
	pub target: DefaultNodeIdx,
	/// Dependency strength, drives the line width.
	pub strength: f64,
	/// Current classes.
	pub classes: ClassList,
}

/// Graph instance combining engine positions with element classes and
/// interaction tracking.
///
/// Created once when the diagram mounts. Positions are laid out and frozen
/// during construction; afterwards only dragging moves nodes.
pub struct DiagramState {
	/// Engine graph holding node positions.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Node drag in progress.
	pub drag: DragState,
	/// Background pan in progress.
	pub pan: PanState,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	hovered: Option<DefaultNodeIdx>,
	nodes: Vec<DiagramNode>,
	edges: Vec<DiagramEdge>,
	node_index: HashMap<DefaultNodeIdx, usize>,
}

impl DiagramState {
	/// Lays out the elements, fits them into the view and marks violations.
	///
	/// Edges naming an unknown component are left out of the graph.
	pub fn new(
		elements: &DiagramElements,
		width: f64,
		height: f64,
		layout: &DiagramLayout,
		zoom: &ZoomConfig,
	) -> Self {
		let mut graph = ForceGraph::new(layout.simulation());
		let seeds = layout.seed_positions(elements);
		let mut ids: HashMap<&str, DefaultNodeIdx> = HashMap::new();
		let mut nodes = Vec::with_capacity(elements.nodes.len());

		for (node, &(x, y)) in elements.nodes.iter().zip(&seeds) {
			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.id.clone(),
					size: node.size.unwrap_or(0.0),
				},
			});
			ids.insert(node.id.as_str(), idx);
			nodes.push(DiagramNode {
				idx,
				id: node.id.clone(),
				size: node.size.unwrap_or(0.0),
				classes: ClassList::default(),
				half_extent: None,
			});
		}

		let mut edges = Vec::with_capacity(elements.edges.len());
		for edge in &elements.edges {
			let (Some(&source), Some(&target)) = (
				ids.get(edge.source.as_str()),
				ids.get(edge.target.as_str()),
			) else {
				warn!(
					"socomo-view: dependency '{}' -> '{}' references an unknown component, skipping",
					edge.source, edge.target
				);
				continue;
			};
			// a spring from a node to itself has no length to work with
			if source != target {
				graph.add_edge(source, target, EdgeData::default());
			}
			edges.push(DiagramEdge {
				source,
				target,
				strength: edge.strength,
				classes: ClassList::default(),
			});
		}

		for _ in 0..layout.settle_ticks {
			graph.update(layout.tick_dt);
		}

		let node_index = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.idx, i))
			.collect();

		let mut state = Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			hovered: None,
			nodes,
			edges,
			node_index,
		};

		let positions = state.positions();
		let seeded: Vec<_> = state.nodes.iter().map(|n| n.idx).zip(seeds).collect();
		for (idx, (x, y)) in seeded {
			let settled = positions.get(&idx).is_some_and(|(px, py)| px.is_finite() && py.is_finite());
			if !settled {
				state.place_node(idx, x as f32, y as f32);
			}
		}

		state.fit(layout.fit_padding, zoom);
		state.mark_violations();
		state
	}

	/// Nodes in component order.
	pub fn nodes(&self) -> &[DiagramNode] {
		&self.nodes
	}

	/// Edges between known nodes, in dependency order.
	pub fn edges(&self) -> &[DiagramEdge] {
		&self.edges
	}

	/// The node currently under the mouse, if any.
	pub fn hovered(&self) -> Option<DefaultNodeIdx> {
		self.hovered
	}

	/// Node by engine index.
	pub fn node(&self, idx: DefaultNodeIdx) -> Option<&DiagramNode> {
		self.node_index.get(&idx).map(|&i| &self.nodes[i])
	}

	/// Looks up a node by component name.
	pub fn node_idx(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.nodes.iter().find(|n| n.id == id).map(|n| n.idx)
	}

	/// Classes of a node, by component name.
	pub fn node_classes(&self, id: &str) -> Option<&ClassList> {
		self.nodes.iter().find(|n| n.id == id).map(|n| &n.classes)
	}

	/// Classes of the first edge from `source` to `target`.
	pub fn edge_classes(&self, source: &str, target: &str) -> Option<&ClassList> {
		let (source, target) = (self.node_idx(source)?, self.node_idx(target)?);
		self.edges
			.iter()
			.find(|e| e.source == source && e.target == target)
			.map(|e| &e.classes)
	}

	/// Snapshot of all node positions in world coordinates.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::with_capacity(self.nodes.len());
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	/// World position of one node.
	pub fn position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	/// Moves a node without running the drag handler.
	pub fn place_node(&mut self, idx: DefaultNodeIdx, x: f32, y: f32) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
	}

	/// Moves a node as the user drags it and re-evaluates its edges.
	pub fn move_node(&mut self, idx: DefaultNodeIdx, x: f32, y: f32) {
		self.place_node(idx, x, y);
		self.on_drag(idx);
	}

	/// Classifies every edge: `violation` iff it points upward.
	/// Returns the number of violations.
	pub fn mark_violations(&mut self) -> usize {
		let positions = self.positions();
		let mut count = 0;
		for edge in &mut self.edges {
			edge.classes.remove(ElementClass::Violation);
			if is_upward(&positions, edge) {
				edge.classes.add(ElementClass::Violation);
				count += 1;
			}
		}
		debug!("socomo-view: {} upward dependencies", count);
		count
	}

	/// Re-evaluates violations of the edges touching `idx` only.
	pub fn on_drag(&mut self, idx: DefaultNodeIdx) {
		let positions = self.positions();
		let connected = self
			.edges
			.iter_mut()
			.filter(|e| e.source == idx || e.target == idx);
		for edge in connected {
			edge.classes.remove(ElementClass::Violation);
			if is_upward(&positions, edge) {
				edge.classes.add(ElementClass::Violation);
			}
		}
	}

	/// Hovers `node`, leaving the previously hovered node first.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hovered == node {
			return;
		}
		if let Some(prev) = self.hovered {
			self.mouse_out(prev);
		}
		if let Some(next) = node {
			self.mouse_over(next);
		}
	}

	/// Hushes everything outside the node's neighborhood and highlights the
	/// node, its outgoers and its incomers.
	pub fn mouse_over(&mut self, idx: DefaultNodeIdx) {
		let hood = self.neighborhood(idx);

		for node in &mut self.nodes {
			if node.idx != idx
				&& !hood.outgoer_nodes.contains(&node.idx)
				&& !hood.incomer_nodes.contains(&node.idx)
			{
				node.classes.add(ElementClass::Hushed);
			}
		}
		for (i, edge) in self.edges.iter_mut().enumerate() {
			if !hood.outgoing.contains(&i) && !hood.incoming.contains(&i) {
				edge.classes.add(ElementClass::Hushed);
			}
		}

		self.apply_to_node(idx, |c| c.add(ElementClass::Highlight));
		self.apply_to_neighborhood(&hood, |c, outgoer| {
			c.add(if outgoer {
				ElementClass::HighlightOutgoer
			} else {
				ElementClass::HighlightIngoer
			})
		});
		self.hovered = Some(idx);
	}

	/// Reverses [`Self::mouse_over`].
	pub fn mouse_out(&mut self, idx: DefaultNodeIdx) {
		let hood = self.neighborhood(idx);

		for node in &mut self.nodes {
			node.classes.remove(ElementClass::Hushed);
		}
		for edge in &mut self.edges {
			edge.classes.remove(ElementClass::Hushed);
		}

		self.apply_to_node(idx, |c| c.remove(ElementClass::Highlight));
		self.apply_to_neighborhood(&hood, |c, outgoer| {
			c.remove(if outgoer {
				ElementClass::HighlightOutgoer
			} else {
				ElementClass::HighlightIngoer
			})
		});
		if self.hovered == Some(idx) {
			self.hovered = None;
		}
	}

	/// Toggles the `dummy` class off and on for every element, forcing
	/// dependent styling to be recomputed.
	pub fn refresh_classes(&mut self) {
		let all = self
			.nodes
			.iter_mut()
			.map(|n| &mut n.classes)
			.chain(self.edges.iter_mut().map(|e| &mut e.classes));
		for classes in all {
			classes.add(ElementClass::Dummy);
			classes.remove(ElementClass::Dummy);
		}
	}

	/// Records the measured label box of a node.
	pub fn set_half_extent(&mut self, idx: DefaultNodeIdx, half_width: f64, half_height: f64) {
		if let Some(&i) = self.node_index.get(&idx) {
			self.nodes[i].half_extent = Some((half_width, half_height));
		}
	}

	/// Centers the diagram and zooms it to fill the view, within zoom limits.
	pub fn fit(&mut self, padding: f64, zoom: &ZoomConfig) {
		let positions = self.positions();
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		for node in &self.nodes {
			let Some(&(x, y)) = positions.get(&node.idx) else {
				continue;
			};
			let (hw, hh) = node.half_extent.unwrap_or((0.0, 0.0));
			let (x0, y0, x1, y1) = (x - hw, y - hh, x + hw, y + hh);
			bounds = Some(match bounds {
				None => (x0, y0, x1, y1),
				Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
			});
		}

		let Some((min_x, min_y, max_x, max_y)) = bounds else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: zoom.clamp(1.0),
			};
			return;
		};

		let (avail_w, avail_h) = (
			(self.width - 2.0 * padding).max(1.0),
			(self.height - 2.0 * padding).max(1.0),
		);
		let (bw, bh) = (max_x - min_x, max_y - min_y);
		let kx = if bw > 0.0 { avail_w / bw } else { f64::INFINITY };
		let ky = if bh > 0.0 { avail_h / bh } else { f64::INFINITY };
		let k = zoom.clamp(kx.min(ky));

		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	/// Converts canvas pixels to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// The topmost node whose label box contains the screen point.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let Some((hw, hh)) = self.node(node.index()).map(|n| n.extent_or(config)) else {
				return;
			};
			let (dx, dy) = ((node.x() as f64 - gx).abs(), (node.y() as f64 - gy).abs());
			if dx <= hw && dy <= hh {
				found = Some(node.index());
			}
		});
		found
	}

	/// Records a new canvas size. The view transform is kept.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn neighborhood(&self, idx: DefaultNodeIdx) -> Neighborhood {
		let mut hood = Neighborhood::default();
		for (i, edge) in self.edges.iter().enumerate() {
			if edge.source == idx {
				hood.outgoing.insert(i);
				hood.outgoer_nodes.insert(edge.target);
			}
			if edge.target == idx {
				hood.incoming.insert(i);
				hood.incomer_nodes.insert(edge.source);
			}
		}
		hood
	}

	fn apply_to_node(&mut self, idx: DefaultNodeIdx, f: impl FnOnce(&mut ClassList)) {
		if let Some(&i) = self.node_index.get(&idx) {
			f(&mut self.nodes[i].classes);
		}
	}

	/// Calls `f(classes, is_outgoer)` on every outgoer and incomer element.
	fn apply_to_neighborhood(&mut self, hood: &Neighborhood, f: impl Fn(&mut ClassList, bool)) {
		for &i in &hood.outgoing {
			f(&mut self.edges[i].classes, true);
		}
		for &i in &hood.incoming {
			f(&mut self.edges[i].classes, false);
		}
		for node in &mut self.nodes {
			if hood.outgoer_nodes.contains(&node.idx) {
				f(&mut node.classes, true);
			}
			if hood.incomer_nodes.contains(&node.idx) {
				f(&mut node.classes, false);
			}
		}
	}
}

/// Outgoing and incoming edges of a node, by index, and the nodes at their
/// far ends.
#[derive(Default)]
struct Neighborhood {
	outgoing: HashSet<usize>,
	incoming: HashSet<usize>,
	outgoer_nodes: HashSet<DefaultNodeIdx>,
	incomer_nodes: HashSet<DefaultNodeIdx>,
}

fn is_upward(positions: &HashMap<DefaultNodeIdx, (f64, f64)>, edge: &DiagramEdge) -> bool {
	match (positions.get(&edge.source), positions.get(&edge.target)) {
		(Some(&(_, source_y)), Some(&(_, target_y))) => target_y < source_y,
		_ => false,
	}
}
