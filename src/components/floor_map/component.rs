use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PointerEvent, WheelEvent, Window,
};

use super::building::Building;
use super::projection::ScreenPoint;
use super::render;
use super::state::{FloorMapState, Viewport};
use super::types::Route;

struct Mounted {
	state: FloorMapState,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

type Shared = Rc<RefCell<Option<Mounted>>>;

/// Runs `f` on the mounted canvas unless it is busy or not mounted yet.
fn update<R>(shared: &Shared, f: impl FnOnce(&mut Mounted) -> R) -> Option<R> {
	let mut guard = shared.try_borrow_mut().ok()?;
	guard.as_mut().map(f)
}

/// The single redraw entry point. A redraw requested while another one holds
/// the state is dropped instead of nesting.
fn redraw(shared: &Shared) {
	let Ok(mut guard) = shared.try_borrow_mut() else {
		debug!("redraw skipped: canvas busy");
		return;
	};
	if let Some(m) = guard.as_mut() {
		render::render(&m.state, &mut m.ctx);
	}
}

fn event_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> ScreenPoint {
	let rect = canvas.get_bounding_client_rect();
	ScreenPoint::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn measure(canvas: &HtmlCanvasElement, window: &Window) -> Viewport {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0));
	Viewport::new(w, h, window.device_pixel_ratio())
}

fn apply_size(canvas: &HtmlCanvasElement, viewport: &Viewport) {
	let (bw, bh) = viewport.backing_size();
	canvas.set_width(bw);
	canvas.set_height(bh);
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{}px", viewport.width));
	let _ = style.set_property("height", &format!("{}px", viewport.height));
}

/// A window `resize` listener that unregisters itself when dropped.
struct ResizeListener {
	window: Window,
	callback: Closure<dyn FnMut()>,
}

impl ResizeListener {
	fn register(window: Window, on_resize: impl FnMut() + 'static) -> Option<Self> {
		let callback = Closure::<dyn FnMut()>::new(on_resize);
		if let Err(err) =
			window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
		{
			error!("floor map: resize listener rejected: {err:?}");
			return None;
		}
		Some(Self { window, callback })
	}
}

impl Drop for ResizeListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Pannable, zoomable canvas drawing `building` with `route` highlighted.
#[component]
pub fn FloorMapCanvas(
	building: Arc<Building>,
	#[prop(into)] route: Signal<Option<Route>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let shared: Shared = Rc::new(RefCell::new(None));
	let resize: Rc<RefCell<Option<ResizeListener>>> = Rc::new(RefCell::new(None));
	let (shared_init, resize_init) = (shared.clone(), resize);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("floor map: no window");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			error!("floor map: canvas has no 2d context");
			return;
		};

		let viewport = measure(&canvas, &window);
		apply_size(&canvas, &viewport);
		let mut state = FloorMapState::new(
			building.graph.clone(),
			building.projection.clone(),
			viewport,
		);
		state.set_route(route.get_untracked().as_ref());
		info!(
			"floor map mounted at {}x{} (pixel ratio {})",
			viewport.width, viewport.height, viewport.pixel_ratio
		);
		*shared_init.borrow_mut() = Some(Mounted {
			state,
			canvas,
			ctx,
		});

		// dropping the previous listener unregisters it before the new one goes in
		resize_init.borrow_mut().take();
		let shared_resize = shared_init.clone();
		*resize_init.borrow_mut() = ResizeListener::register(window.clone(), move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let resized = update(&shared_resize, |m| {
				let viewport = measure(&m.canvas, &win);
				apply_size(&m.canvas, &viewport);
				m.state.resize(viewport);
				debug!("floor map resized to {}x{}", viewport.width, viewport.height);
			});
			if resized.is_some() {
				redraw(&shared_resize);
			}
		});

		redraw(&shared_init);
	});

	let shared_route = shared.clone();
	Effect::new(move |_| {
		let current = route.get();
		if update(&shared_route, |m| m.state.set_route(current.as_ref())).is_some() {
			redraw(&shared_route);
		}
	});

	let shared_pd = shared.clone();
	let on_pointerdown = move |ev: PointerEvent| {
		update(&shared_pd, |m| {
			let at = event_point(&m.canvas, &ev);
			let _ = m.canvas.set_pointer_capture(ev.pointer_id());
			m.state.pointer_down(ev.pointer_id(), at);
		});
	};

	let shared_pm = shared.clone();
	let on_pointermove = move |ev: PointerEvent| {
		let moved = update(&shared_pm, |m| {
			let at = event_point(&m.canvas, &ev);
			m.state.pointer_move(ev.pointer_id(), at)
		});
		if moved == Some(true) {
			redraw(&shared_pm);
		}
	};

	let shared_pu = shared.clone();
	let on_pointerup = move |ev: PointerEvent| {
		update(&shared_pu, |m| m.state.pointer_up(ev.pointer_id()));
	};

	let shared_pc = shared.clone();
	let on_pointercancel = move |ev: PointerEvent| {
		update(&shared_pc, |m| m.state.pointer_up(ev.pointer_id()));
	};

	let shared_wh = shared.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let zoomed = update(&shared_wh, |m| {
			let at = event_point(&m.canvas, &ev);
			m.state.wheel(at, ev.delta_y())
		});
		if zoomed == Some(true) {
			redraw(&shared_wh);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="floor-map-canvas"
			on:pointerdown=on_pointerdown
			on:pointermove=on_pointermove
			on:pointerup=on_pointerup
			on:pointercancel=on_pointercancel
			on:wheel=on_wheel
			style="display: block; cursor: grab; touch-action: none;"
		/>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;

	use wasm_bindgen_test::*;
	use web_sys::Event;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn fire_resize(window: &Window) {
		let event = Event::new("resize").unwrap();
		window.dispatch_event(&event).unwrap();
	}

	#[wasm_bindgen_test]
	fn resize_listener_unregisters_when_dropped() {
		let window = web_sys::window().unwrap();
		let hits = Rc::new(Cell::new(0));
		let counter = hits.clone();
		let listener =
			ResizeListener::register(window.clone(), move || counter.set(counter.get() + 1))
				.unwrap();

		fire_resize(&window);
		assert_eq!(hits.get(), 1);

		drop(listener);
		fire_resize(&window);
		assert_eq!(hits.get(), 1);
	}

	#[wasm_bindgen_test]
	fn replacing_the_listener_leaves_one_registered() {
		let window = web_sys::window().unwrap();
		let hits = Rc::new(Cell::new(0));
		let slot: RefCell<Option<ResizeListener>> = RefCell::new(None);
		for _ in 0..3 {
			slot.borrow_mut().take();
			let counter = hits.clone();
			*slot.borrow_mut() =
				ResizeListener::register(window.clone(), move || counter.set(counter.get() + 1));
		}

		fire_resize(&window);
		assert_eq!(hits.get(), 1);
		slot.borrow_mut().take();
	}
}
