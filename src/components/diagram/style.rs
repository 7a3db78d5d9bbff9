//! The diagram style sheet: colors per element class.

use super::classes::{ClassList, ElementClass};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with the given opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node box and label style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fill of a node at rest.
	pub fill: Color,
	/// Box border.
	pub border: Color,
	/// Label text.
	pub label: Color,
	/// Fill of the hovered node.
	pub highlight_fill: Color,
	/// Fill of nodes the hovered node depends on.
	pub outgoer_fill: Color,
	/// Fill of nodes depending on the hovered node.
	pub ingoer_fill: Color,
	/// Web font for labels, with fallbacks.
	pub font_family: &'static str,
	/// Box corner radius in world units.
	pub corner_radius: f64,
	/// Border width in screen pixels at zoom 1.
	pub border_width: f64,
}

/// Edge line and arrow style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Edge at rest.
	pub color: Color,
	/// Upward dependencies.
	pub violation_color: Color,
	/// Edges leaving the hovered node.
	pub outgoer_color: Color,
	/// Edges entering the hovered node.
	pub ingoer_color: Color,
}

/// Complete diagram style sheet.
#[derive(Clone, Debug)]
pub struct DiagramStyle {
	/// Name shown in logs.
	pub name: &'static str,
	/// Canvas background.
	pub background: Color,
	/// Node boxes and labels.
	pub node: NodeStyle,
	/// Dependency lines and arrows.
	pub edge: EdgeStyle,
	/// Opacity of hushed elements.
	pub hushed_alpha: f64,
}

impl DiagramStyle {
	/// Light style of the standalone socomo page.
	pub fn light() -> Self {
		Self {
			name: "light",
			background: Color::rgb(250, 250, 250),
			node: NodeStyle {
				fill: Color::rgb(223, 232, 243),
				border: Color::rgb(94, 129, 172),
				label: Color::rgb(33, 37, 41),
				highlight_fill: Color::rgb(255, 214, 102),
				outgoer_fill: Color::rgb(200, 230, 201),
				ingoer_fill: Color::rgb(187, 222, 251),
				font_family: "'Roboto Condensed', 'Arial Narrow', sans-serif",
				corner_radius: 4.0,
				border_width: 1.0,
			},
			edge: EdgeStyle {
				color: Color::rgba(120, 130, 145, 0.8),
				violation_color: Color::rgb(211, 47, 47),
				outgoer_color: Color::rgb(56, 142, 60),
				ingoer_color: Color::rgb(25, 118, 210),
			},
			hushed_alpha: 0.15,
		}
	}

	/// Fill color of a node with the given classes.
	pub fn node_fill(&self, classes: &ClassList) -> Color {
		let fill = if classes.has(ElementClass::Highlight) {
			self.node.highlight_fill
		} else if classes.has(ElementClass::HighlightOutgoer) {
			self.node.outgoer_fill
		} else if classes.has(ElementClass::HighlightIngoer) {
			self.node.ingoer_fill
		} else {
			self.node.fill
		};
		fill.with_alpha(fill.a * self.alpha(classes))
	}

	/// Line color of an edge with the given classes.
	///
	/// Hover highlighting wins over the violation marker, so the direction
	/// of a hovered node's dependencies stays readable.
	pub fn edge_color(&self, classes: &ClassList) -> Color {
		let color = if classes.has(ElementClass::HighlightOutgoer) {
			self.edge.outgoer_color
		} else if classes.has(ElementClass::HighlightIngoer) {
			self.edge.ingoer_color
		} else if classes.has(ElementClass::Violation) {
			self.edge.violation_color
		} else {
			self.edge.color
		};
		color.with_alpha(color.a * self.alpha(classes))
	}

	/// Overall opacity multiplier of an element.
	pub fn alpha(&self, classes: &ClassList) -> f64 {
		if classes.has(ElementClass::Hushed) {
			self.hushed_alpha
		} else {
			1.0
		}
	}
}

impl Default for DiagramStyle {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn classes(list: &[ElementClass]) -> ClassList {
		let mut classes = ClassList::default();
		for &class in list {
			classes.add(class);
		}
		classes
	}

	#[test]
	fn violation_edges_are_red_until_highlighted() {
		let style = DiagramStyle::default();
		let violation = classes(&[ElementClass::Violation]);
		assert_eq!(style.edge_color(&violation), style.edge.violation_color);

		let hovered = classes(&[ElementClass::Violation, ElementClass::HighlightIngoer]);
		assert_eq!(style.edge_color(&hovered), style.edge.ingoer_color);
	}

	#[test]
	fn hushed_elements_fade() {
		let style = DiagramStyle::default();
		let hushed = classes(&[ElementClass::Hushed]);
		assert_eq!(style.node_fill(&hushed).a, style.hushed_alpha);
		assert_eq!(style.node_fill(&ClassList::default()), style.node.fill);
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
		assert_eq!(Color::rgb(0, 0, 0).lighten(1.0), Color::rgb(255, 255, 255));
	}
}
