//! Graph elements derived from a level: the input to the diagram engine.

use serde::Serialize;

use crate::composition::{Level, split_dependency_key};

/// A component drawn as a node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeElement {
	/// Component name, unique within a level.
	pub id: String,
	/// Relative size carried over from the component properties.
	pub size: Option<f64>,
}

/// A dependency drawn as a directed edge.
///
/// `source` and `target` are not checked against the level's components.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeElement {
	/// Name of the depending component.
	pub source: String,
	/// Name of the component depended upon.
	pub target: String,
	/// Edge weight.
	pub strength: f64,
}

/// Nodes and edges of one diagram.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiagramElements {
	/// Nodes in component order.
	pub nodes: Vec<NodeElement>,
	/// Edges in dependency order.
	pub edges: Vec<EdgeElement>,
}

impl DiagramElements {
	/// Maps the components and dependencies of a level into graph elements.
	pub fn from_level(level: &Level) -> Self {
		let nodes = level
			.components
			.iter()
			.map(|(name, props)| NodeElement {
				id: name.clone(),
				size: props.size,
			})
			.collect();

		let edges = level
			.dependencies
			.iter()
			.map(|(key, props)| {
				let (source, target) = split_dependency_key(key);
				EdgeElement {
					source: source.to_string(),
					target: target.to_string(),
					strength: props.strength,
				}
			})
			.collect();

		Self { nodes, edges }
	}

	/// Edges whose source or target is not one of the nodes.
	pub fn dangling_edges(&self) -> impl Iterator<Item = &EdgeElement> {
		self.edges.iter().filter(|edge| {
			!self.nodes.iter().any(|n| n.id == edge.source)
				|| !self.nodes.iter().any(|n| n.id == edge.target)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::composition::Composition;

	fn level(json: &str) -> Level {
		Composition::from_json(json)
			.unwrap()
			.into_first_level()
			.unwrap()
			.1
	}

	#[test]
	fn dependency_becomes_edge_with_strength() {
		let level = level(
			r#"{ "L": {
				"components": { "A": {}, "B": {} },
				"dependencies": { "A -> B": { "strength": 0.7 } }
			} }"#,
		);
		let elements = DiagramElements::from_level(&level);

		assert_eq!(elements.nodes.len(), 2);
		assert_eq!(
			elements.edges,
			vec![EdgeElement {
				source: "A".into(),
				target: "B".into(),
				strength: 0.7,
			}]
		);
		assert_eq!(elements.dangling_edges().count(), 0);
	}

	#[test]
	fn nodes_keep_component_order() {
		let level = level(r#"{ "L": { "components": { "z": {}, "m": { "size": 0.5 }, "a": {} } } }"#);
		let elements = DiagramElements::from_level(&level);
		let ids: Vec<_> = elements.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["z", "m", "a"]);
		assert_eq!(elements.nodes[1].size, Some(0.5));
	}

	#[test]
	fn unknown_component_leaves_dangling_edge() {
		let level = level(
			r#"{ "L": {
				"components": { "A": {} },
				"dependencies": { "A -> ghost": { "strength": 1.0 }, "broken": { "strength": 1.0 } }
			} }"#,
		);
		let elements = DiagramElements::from_level(&level);

		assert_eq!(elements.edges.len(), 2);
		let dangling: Vec<_> = elements
			.dangling_edges()
			.map(|e| (e.source.as_str(), e.target.as_str()))
			.collect();
		assert_eq!(dangling, vec![("A", "ghost"), ("broken", "")]);
	}
}
