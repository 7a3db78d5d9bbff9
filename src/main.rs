//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use log::warn;
use socomo_view::{init_logging, load_composition, start};

fn main() {
	init_logging();

	let Some((module_name, composition)) = load_composition() else {
		return;
	};
	if let Err(e) = start(&module_name, composition) {
		warn!("socomo-view: {}", e);
	}
}
