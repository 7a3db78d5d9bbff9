//! Redraw after web fonts load.
//!
//! Canvas labels are measured with whatever font is available at the time.
//! If the label web font is still downloading, boxes get sized for the
//! fallback font, so the diagram stays hidden until the font set is ready.

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Hides `container` and runs `on_ready` once the document's fonts have
/// loaded, then shows the container again. Runs immediately when the font
/// loading API is unavailable.
pub fn reveal_when_fonts_ready(container: Option<HtmlElement>, on_ready: impl FnOnce() + 'static) {
	if let Some(ref el) = container {
		let _ = el.style().set_property("visibility", "hidden");
	}

	let finish = move || {
		on_ready();
		if let Some(ref el) = container {
			let _ = el.style().set_property("visibility", "visible");
		}
	};

	let ready = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.fonts().ready().ok());

	match ready {
		Some(promise) => {
			let cb = Closure::once(move |_: JsValue| {
				debug!("socomo-view: fonts ready, refreshing diagram");
				finish();
			});
			let _ = promise.then(&cb);
			cb.forget();
		}
		None => {
			debug!("socomo-view: font loading API unavailable, refreshing now");
			finish();
		}
	}
}
