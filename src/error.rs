//! Error type for loading and mounting a composition.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while turning host input into a mounted diagram.
#[derive(Debug, Error)]
pub enum ViewError {
	/// The composition JSON did not match the expected shape.
	#[error("failed to parse composition: {0}")]
	Parse(#[from] serde_json::Error),

	/// A JS value could not be turned into JSON text.
	#[error("failed to serialize composition: {0}")]
	Serialize(String),

	/// There is no window, document or body to mount into.
	#[error("document body is not available")]
	NoDocument,
}

impl From<ViewError> for JsValue {
	fn from(err: ViewError) -> Self {
		JsValue::from_str(&err.to_string())
	}
}
