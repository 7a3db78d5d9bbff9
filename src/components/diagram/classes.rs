//! Presentation classes attached to diagram elements.

use std::collections::BTreeSet;
use std::fmt;

/// A visual marker an element can carry. The renderer styles elements by
/// the set of classes they hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementClass {
	/// Edge pointing upward in the current layout.
	Violation,
	/// Dimmed while another node is hovered.
	Hushed,
	/// The hovered node.
	Highlight,
	/// Outgoing edge of the hovered node, or its target.
	HighlightOutgoer,
	/// Incoming edge of the hovered node, or its source.
	HighlightIngoer,
	/// Toggled to force a restyle after web fonts load.
	Dummy,
}

impl ElementClass {
	/// Class name as used in style sheets.
	pub fn as_str(self) -> &'static str {
		match self {
			ElementClass::Violation => "violation",
			ElementClass::Hushed => "hushed",
			ElementClass::Highlight => "highlight",
			ElementClass::HighlightOutgoer => "highlight-outgoer",
			ElementClass::HighlightIngoer => "highlight-ingoer",
			ElementClass::Dummy => "dummy",
		}
	}
}

impl fmt::Display for ElementClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Set of classes on one element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList(BTreeSet<ElementClass>);

impl ClassList {
	/// Adds a class; adding twice is a no-op.
	pub fn add(&mut self, class: ElementClass) {
		self.0.insert(class);
	}

	/// Removes a class if present.
	pub fn remove(&mut self, class: ElementClass) {
		self.0.remove(&class);
	}

	/// Whether the class is present.
	pub fn has(&self, class: ElementClass) -> bool {
		self.0.contains(&class)
	}

	/// Whether no class is present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Classes in a stable order.
	pub fn iter(&self) -> impl Iterator<Item = ElementClass> + '_ {
		self.0.iter().copied()
	}
}

impl fmt::Display for ClassList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, class) in self.iter().enumerate() {
			if i > 0 {
				f.write_str(" ")?;
			}
			f.write_str(class.as_str())?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_and_remove_are_idempotent() {
		let mut classes = ClassList::default();
		classes.add(ElementClass::Violation);
		classes.add(ElementClass::Violation);
		assert!(classes.has(ElementClass::Violation));

		classes.remove(ElementClass::Violation);
		classes.remove(ElementClass::Violation);
		assert!(classes.is_empty());
	}

	#[test]
	fn display_lists_class_names() {
		let mut classes = ClassList::default();
		classes.add(ElementClass::HighlightIngoer);
		classes.add(ElementClass::Violation);
		assert_eq!(classes.to_string(), "violation highlight-ingoer");
	}
}
