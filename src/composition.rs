//! Composition data model: levels of components and their dependencies.
//!
//! Maps keep the insertion order of the source JSON, since the first level of a
//! composition is the one that gets drawn.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// Separator between the two component names of a dependency key.
pub const DEPENDENCY_SEPARATOR: &str = " -> ";

/// Full dependency description of a module, keyed by level name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition {
	/// Levels in insertion order.
	pub levels: IndexMap<String, Level>,
}

/// One granularity of architecture view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
	/// Component name to properties.
	#[serde(default)]
	pub components: IndexMap<String, ComponentProps>,
	/// Keyed by `"<from> -> <to>"`.
	#[serde(default)]
	pub dependencies: IndexMap<String, DependencyProps>,
}

/// Properties of a component.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentProps {
	/// Relative size, 0.0 to 1.0 when produced by the shell page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<f64>,
}

/// Properties of a dependency between two components.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyProps {
	/// Edge weight, passed through to the diagram untouched.
	#[serde(default)]
	pub strength: f64,
}

impl Composition {
	/// Parses a composition from JSON text.
	pub fn from_json(json: &str) -> Result<Self, ViewError> {
		Ok(serde_json::from_str(json)?)
	}

	/// The first level in key order, the only one currently drawn.
	pub fn first_level(&self) -> Option<(&str, &Level)> {
		self.levels
			.first()
			.map(|(name, level)| (name.as_str(), level))
	}

	/// Consumes the composition, keeping only its first level.
	pub fn into_first_level(self) -> Option<(String, Level)> {
		self.levels.into_iter().next()
	}
}

impl Level {
	/// Largest component size, used to normalize sizes.
	pub fn max_component_size(&self) -> f64 {
		self.components
			.values()
			.filter_map(|c| c.size)
			.fold(0.0, f64::max)
	}

	/// Largest dependency strength, used to normalize strengths.
	pub fn max_dependency_strength(&self) -> f64 {
		self.dependencies
			.values()
			.map(|d| d.strength)
			.fold(0.0, f64::max)
	}
}

/// Splits a dependency key into its `(from, to)` names.
///
/// Keys without the separator yield an empty target. Extra separators are
/// ignored past the second name. Neither case is reported.
pub fn split_dependency_key(key: &str) -> (&str, &str) {
	let mut parts = key.split(DEPENDENCY_SEPARATOR);
	let from = parts.next().unwrap_or_default();
	let to = parts.next().unwrap_or_default();
	(from, to)
}

#[cfg(test)]
mod tests {
	use super::*;

	const TWO_LEVELS: &str = r#"{
		"L1": {
			"components": { "web": { "size": 1.0 }, "core": {} },
			"dependencies": { "web -> core": { "strength": 0.5 } }
		},
		"L2": {
			"components": { "other": {} },
			"dependencies": {}
		}
	}"#;

	#[test]
	fn first_level_follows_key_order() {
		let composition = Composition::from_json(TWO_LEVELS).unwrap();
		let (name, level) = composition.first_level().unwrap();
		assert_eq!(name, "L1");
		assert_eq!(
			level.components.keys().collect::<Vec<_>>(),
			vec!["web", "core"]
		);
	}

	#[test]
	fn first_level_is_independent_of_alphabetical_order() {
		let json = r#"{ "zeta": {}, "alpha": {} }"#;
		let composition = Composition::from_json(json).unwrap();
		assert_eq!(composition.first_level().unwrap().0, "zeta");
		assert_eq!(composition.into_first_level().unwrap().0, "zeta");
	}

	#[test]
	fn empty_composition_has_no_level() {
		let composition = Composition::from_json("{}").unwrap();
		assert!(composition.first_level().is_none());
	}

	#[test]
	fn missing_maps_and_strength_default() {
		let json = r#"{ "L": { "dependencies": { "a -> b": {} } } }"#;
		let composition = Composition::from_json(json).unwrap();
		let (_, level) = composition.first_level().unwrap();
		assert!(level.components.is_empty());
		assert_eq!(level.dependencies["a -> b"].strength, 0.0);
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = Composition::from_json("[1, 2]").unwrap_err();
		assert!(matches!(err, ViewError::Parse(_)));
	}

	#[test]
	fn split_dependency_key_cases() {
		assert_eq!(split_dependency_key("a -> b"), ("a", "b"));
		assert_eq!(split_dependency_key("a->b"), ("a->b", ""));
		assert_eq!(split_dependency_key("a -> b -> c"), ("a", "b"));
	}

	#[test]
	fn max_values_ignore_missing_sizes() {
		let composition = Composition::from_json(TWO_LEVELS).unwrap();
		let (_, level) = composition.first_level().unwrap();
		assert_eq!(level.max_component_size(), 1.0);
		assert_eq!(level.max_dependency_strength(), 0.5);
	}
}
