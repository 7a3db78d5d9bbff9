//! Leptos component wrapping the diagram canvas.
//!
//! The component creates an HTML canvas inside its container and wires up
//! mouse/wheel event handlers for node dragging, hovering, panning, and
//! zooming. An animation loop runs via `requestAnimationFrame`, redrawing
//! the current state each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window};

use super::elements::DiagramElements;
use super::fonts;
use super::layout::DiagramLayout;
use super::render;
use super::scale::ScaleConfig;
use super::state::DiagramState;
use super::style::DiagramStyle;

/// Bundles the graph instance with its fixed visual configuration.
struct DiagramContext {
	state: DiagramState,
	scale: ScaleConfig,
	style: DiagramStyle,
	layout: DiagramLayout,
}

/// Size of the canvas's container, or the explicit override.
fn container_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(600.0)
		}),
	)
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an interactive dependency diagram on a canvas element.
///
/// The component sizes itself to its parent container and follows window
/// resizes; explicit `width`/`height` override automatic sizing. The
/// container is hidden until web fonts are ready so labels are measured
/// with the right font.
#[component]
pub fn DiagramCanvas(
	#[prop(into)] elements: Signal<DiagramElements>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<DiagramContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = container_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				warn!("socomo-view: canvas 2d context unavailable");
				return;
			}
		};

		let elements = elements.get();
		let (scale, style, layout) = (
			ScaleConfig::default(),
			DiagramStyle::default(),
			DiagramLayout::default(),
		);
		let state = DiagramState::new(&elements, w, h, &layout, &scale.zoom);
		info!(
			"socomo-view: diagram of {} components, {} dependencies ({} style)",
			state.nodes().len(),
			state.edges().len(),
			style.name
		);
		*context_init.borrow_mut() = Some(DiagramContext {
			state,
			scale,
			style,
			layout,
		});

		let container = canvas
			.parent_element()
			.and_then(|p| p.dyn_into::<HtmlElement>().ok());
		let (context_fonts, ctx_fonts) = (context_init.clone(), ctx.clone());
		fonts::reveal_when_fonts_ready(container, move || {
			if let Some(ref mut c) = *context_fonts.borrow_mut() {
				c.state.refresh_classes();
				render::measure(&mut c.state, &ctx_fonts, &c.scale, &c.style);
				c.state.fit(c.layout.fit_padding, &c.scale.zoom);
			}
		});

		if width.is_none() || height.is_none() {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let (nw, nh) = container_size(&canvas_resize, width, height);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref c) = *context_anim.borrow() {
				render::render(&c.state, &ctx, &c.scale, &c.style);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas.into(), &ev);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(idx) = c.state.node_at_position(x, y, &c.scale) {
				let Some((nx, ny)) = c.state.position(idx) else {
					return;
				};
				c.state.drag.active = true;
				c.state.drag.node_idx = Some(idx);
				c.state.drag.start_x = x;
				c.state.drag.start_y = y;
				c.state.drag.node_start_x = nx as f32;
				c.state.drag.node_start_y = ny as f32;
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas.into(), &ev);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			// Hover follows the mouse only while nothing is being dragged
			if !c.state.drag.active {
				let hovered = c.state.node_at_position(x, y, &c.scale);
				c.state.set_hover(hovered);
			}

			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node_idx {
					let (dx, dy) = (
						(x - c.state.drag.start_x) / c.state.transform.k,
						(y - c.state.drag.start_y) / c.state.transform.k,
					);
					let (nx, ny) = (
						c.state.drag.node_start_x + dx as f32,
						c.state.drag.node_start_y + dy as f32,
					);
					c.state.move_node(idx, nx, ny);
				}
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
			c.state.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas.into(), &ev);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let zoom = &c.scale.zoom;
			let new_k = zoom.clamp(c.state.transform.k * zoom.wheel_factor(ev.delta_y()));
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="diagram-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
