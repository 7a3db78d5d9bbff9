//! socomo-view: interactive dependency diagram for one level of a module's
//! source code composition.
//!
//! This crate provides a WASM entry point that takes a composition (levels of
//! components and their dependencies), picks its first level and renders it as
//! a layered, draggable diagram with violation and hover highlighting. It also
//! generates the HTML launcher page that feeds a composition to that entry
//! point.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level as LogLevel, debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod composition;
pub mod error;
pub mod shell;

pub use components::diagram::{DiagramCanvas, DiagramElements};
pub use components::header::Header;
pub use composition::{Composition, Level};
pub use error::ViewError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(LogLevel::Debug);
	console_error_panic_hook::set_once();
	info!("socomo-view: logging initialized");
}

/// Load a composition from a script element with id="composition".
///
/// The element's text is the composition JSON and its `data-module` attribute
/// names the module. Launcher pages that call `socomo` themselves have no such
/// element.
pub fn load_composition() -> Option<(String, Composition)> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let Some(element) = document.get_element_by_id("composition") else {
		debug!("socomo-view: no composition element, waiting for a socomo() call");
		return None;
	};
	let module_name = element.get_attribute("data-module").unwrap_or_default();
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match Composition::from_json(&json_text) {
		Ok(composition) => Some((module_name, composition)),
		Err(e) => {
			warn!("socomo-view: {}", e);
			None
		}
	}
}

/// Renders the first level of `composition`, replacing the page body.
pub fn start(module_name: &str, composition: Composition) -> Result<(), ViewError> {
	info!(
		"socomo-view: composition of {} loaded with {} levels",
		module_name,
		composition.levels.len()
	);
	let (level_name, level) = composition.into_first_level().unwrap_or_else(|| {
		warn!("socomo-view: composition of {} has no levels", module_name);
		(String::new(), Level::default())
	});

	let body = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
		.ok_or(ViewError::NoDocument)?;
	body.set_inner_html("");

	let module_name = module_name.to_string();
	info!("socomo-view: mounting level {}", level_name);
	mount_to_body(move || {
		view! { <App module_name=module_name level_name=level_name level=level /> }
	});
	Ok(())
}

/// JS entry point: `socomo(moduleName, composition)`.
#[wasm_bindgen]
pub fn socomo(module_name: String, composition: JsValue) -> Result<(), JsValue> {
	let json = js_sys::JSON::stringify(&composition)
		.map_err(|e| ViewError::Serialize(format!("{e:?}")))?;
	let json = JsValue::from(json)
		.as_string()
		.ok_or_else(|| ViewError::Serialize("composition is not a JSON value".to_string()))?;
	let composition = Composition::from_json(&json)?;
	start(&module_name, composition)?;
	Ok(())
}

/// Main application component.
/// Shows the header and the diagram of one level.
#[component]
pub fn App(module_name: String, level_name: String, level: Level) -> impl IntoView {
	provide_meta_context();

	let elements = DiagramElements::from_level(&level);
	let elements_signal = Signal::derive(move || elements.clone());
	let title = format!("SoCoMo: {module_name}");

	view! {
		<Title text=title />
		<Meta charset="UTF-8" />

		<Header module_name=module_name level_name=level_name />
		<div
			id="diagram-container"
			style="position: absolute; top: 4em; bottom: 0; left: 0; right: 0;"
		>
			<div id="main-diagram" style="width: 100%; height: 100%;">
				<DiagramCanvas elements=elements_signal />
			</div>
		</div>
	}
}
