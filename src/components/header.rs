//! Page header above the diagram.

use leptos::prelude::*;

/// Page header naming the module and the level on display.
#[component]
pub fn Header(module_name: String, level_name: String) -> impl IntoView {
	view! {
		<div id="header-container">
			<h1>
				{module_name}
				"\u{a0}\u{276d}\u{a0}"
				<code>{level_name}</code>
			</h1>
		</div>
	}
}
