//! Dependency diagram component.
//!
//! Renders one level of a composition on an HTML canvas with:
//! - Layered placement relaxed by the `force_graph` simulation, then frozen
//! - Upward dependencies marked as violations, kept current while dragging
//! - Hover highlighting of a node's incoming and outgoing dependencies
//! - Pan and zoom within fixed zoom limits
//!
//! # Example
//!
//! ```ignore
//! use socomo_view::components::diagram::{DiagramCanvas, DiagramElements};
//!
//! let elements = DiagramElements::from_level(&level);
//! view! { <DiagramCanvas elements=Signal::derive(move || elements.clone()) /> }
//! ```

pub mod classes;
mod component;
pub mod elements;
mod fonts;
pub mod layout;
mod render;
pub mod scale;
pub mod state;
pub mod style;

pub use classes::{ClassList, ElementClass};
pub use component::DiagramCanvas;
pub use elements::{DiagramElements, EdgeElement, NodeElement};
pub use layout::DiagramLayout;
pub use state::DiagramState;
pub use style::DiagramStyle;
