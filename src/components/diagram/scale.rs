//! Zoom-dependent sizing for diagram visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the layout. Values in world-space
//!   scale proportionally with zoom (appear larger when zoomed in).
//! - **Screen-space**: Pixel coordinates on the canvas. Values in screen-space
//!   remain constant regardless of zoom level.
//!
//! Node boxes and labels live in world-space, like the layout itself. Arrow
//! heads and hover outlines use [`ScaleBehavior`] to stay readable when the
//! view is zoomed far out.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Node box and label sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Label font size in world units for a component without size.
	pub font_size: f64,
	/// Extra font size fraction for the largest component (size 1.0).
	pub size_boost: f64,
	/// Horizontal padding between label and box border.
	pub padding_x: f64,
	/// Vertical padding between label and box border.
	pub padding_y: f64,
	/// Half-extent used for hit testing before a label has been measured.
	pub fallback_half_width: f64,
}

/// Edge line sizing by dependency strength.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width of a zero-strength edge, in world units.
	pub min_width: f64,
	/// Line width of a full-strength edge, in world units.
	pub max_width: f64,
}

/// Arrow head sizing.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Base arrow size in world units.
	pub size: f64,
	/// How arrow size scales with zoom.
	pub size_behavior: ScaleBehavior,
}

/// Zoom limits and wheel response.
#[derive(Clone, Debug)]
pub struct ZoomConfig {
	/// Smallest zoom factor.
	pub min: f64,
	/// Largest zoom factor.
	pub max: f64,
	/// Fraction of a full zoom step applied per wheel notch.
	pub wheel_sensitivity: f64,
}

impl ZoomConfig {
	const FULL_STEP: f64 = 0.25;

	/// Clamp a zoom factor to the configured limits.
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}

	/// Multiplicative zoom change for a wheel event.
	pub fn wheel_factor(&self, delta_y: f64) -> f64 {
		let step = Self::FULL_STEP * self.wheel_sensitivity;
		if delta_y > 0.0 { 1.0 - step } else { 1.0 + step }
	}
}

/// Complete sizing configuration for the diagram.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node boxes and labels.
	pub node: NodeScaleConfig,
	/// Dependency lines.
	pub edge: EdgeScaleConfig,
	/// Arrow heads.
	pub arrow: ArrowScaleConfig,
	/// Zoom limits.
	pub zoom: ZoomConfig,
	/// Hover outline width in screen pixels.
	pub outline_width: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				font_size: 14.0,
				size_boost: 0.5,
				padding_x: 10.0,
				padding_y: 6.0,
				fallback_half_width: 40.0,
			},
			edge: EdgeScaleConfig {
				min_width: 1.0,
				max_width: 8.0,
			},
			arrow: ArrowScaleConfig {
				size: 9.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: 18.0,
				},
			},
			zoom: ZoomConfig {
				min: 0.1,
				max: 1.5,
				wheel_sensitivity: 0.3,
			},
			outline_width: 2.0,
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Arrow size in world-space.
	pub arrow_size: f64,
	/// Hover outline width in world-space.
	pub outline_width: f64,
	min_edge_width: f64,
	max_edge_width: f64,
	font_size: f64,
	size_boost: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			outline_width: ScaleBehavior::Screen.apply(config.outline_width, k),
			min_edge_width: config.edge.min_width,
			max_edge_width: config.edge.max_width,
			font_size: config.node.font_size,
			size_boost: config.node.size_boost,
		}
	}

	/// Edge line width for a dependency strength, clamped to `0.0..=1.0`.
	pub fn edge_width(&self, strength: f64) -> f64 {
		let t = if strength.is_finite() {
			strength.clamp(0.0, 1.0)
		} else {
			0.0
		};
		self.min_edge_width + (self.max_edge_width - self.min_edge_width) * t
	}

	/// Label font size for a node with the given relative size.
	pub fn font_size(&self, size: f64) -> f64 {
		self.font_size * (1.0 + self.size_boost * size.clamp(0.0, 1.0))
	}

	/// CSS font shorthand for a node label.
	pub fn label_font(&self, size: f64, family: &str) -> String {
		format!("{}px {}", self.font_size(size), family)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_width_follows_strength() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert_eq!(scale.edge_width(0.0), 1.0);
		assert_eq!(scale.edge_width(1.0), 8.0);
		assert_eq!(scale.edge_width(0.5), 4.5);
		assert_eq!(scale.edge_width(42.0), 8.0);
		assert_eq!(scale.edge_width(f64::NAN), 1.0);
	}

	#[test]
	fn arrow_size_is_clamped_in_screen_space() {
		let config = ScaleConfig::default();
		// zoomed far out: 9 world units would be under 6 screen pixels
		let far = ScaledValues::new(&config, 0.25);
		assert_eq!(far.arrow_size, 24.0);
		let near = ScaledValues::new(&config, 1.0);
		assert_eq!(near.arrow_size, 9.0);
	}

	#[test]
	fn screen_behavior_keeps_pixel_size() {
		assert_eq!(ScaleBehavior::Screen.apply(2.0, 2.0), 1.0);
		let scale = ScaledValues::new(&ScaleConfig::default(), 4.0);
		assert_eq!(scale.outline_width, 0.5);
	}

	#[test]
	fn zoom_is_clamped_and_wheel_is_damped() {
		let zoom = ScaleConfig::default().zoom;
		assert_eq!(zoom.clamp(3.0), 1.5);
		assert_eq!(zoom.clamp(0.01), 0.1);
		assert!(zoom.wheel_factor(1.0) < 1.0);
		assert!(zoom.wheel_factor(-1.0) > 1.0);
		assert!((zoom.wheel_factor(-1.0) - 1.075).abs() < 1e-9);
	}

	#[test]
	fn label_font_grows_with_size() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert_eq!(scale.label_font(0.0, "serif"), "14px serif");
		assert_eq!(scale.label_font(1.0, "serif"), "21px serif");
	}
}
