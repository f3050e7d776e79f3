use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::error::TopologyError;
use super::model::TopologyGraph;
use super::nav::NavigationCommand;
use super::render;
use super::scene::{DetailPanel, RenderConfig};
use super::state::TopologyState;
use super::types::TopologyData;

/// Interactive topology view. Rebuilds and swaps the graph whenever `data`
/// changes; integrity errors are raised to the enclosing `ErrorBoundary`.
#[component]
pub fn TopologyCanvas(
	#[prop(into)] data: Signal<TopologyData>,
	#[prop(optional)] config: RenderConfig,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<TopologyState>>> = Rc::new(RefCell::new(None));
	// Frame callback and its pending request, released on cleanup.
	let animate = StoredValue::new_local(None::<Closure<dyn FnMut(f64)>>);
	let frame = StoredValue::new_local(None::<i32>);
	let running = Arc::new(AtomicBool::new(true));
	let (state_init, running_init) = (state.clone(), running.clone());

	let panel = RwSignal::new(None::<DetailPanel>);
	// Last shown panel, kept so the exit transition still has content.
	let shown_panel = RwSignal::new(None::<DetailPanel>);
	let error = RwSignal::new(None::<TopologyError>);
	let cursor = RwSignal::new("default");

	let sync_panel = move |s: &TopologyState| match s.panel() {
		Ok(next) => {
			if next.is_some() {
				shown_panel.set(next.clone());
			}
			if panel.get_untracked() != next {
				panel.set(next);
			}
		}
		Err(err) => {
			log::error!("detail panel failed: {}", err);
			error.set(Some(err));
		}
	};

	on_cleanup({
		let running = running.clone();
		move || {
			running.store(false, Ordering::Relaxed);
			if let (Some(Some(id)), Some(win)) = (frame.try_get_value(), web_sys::window()) {
				let _ = win.cancel_animation_frame(id);
			}
			animate.try_update_value(|cb| cb.take());
		}
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let graph = match TopologyGraph::build(&data.get()) {
			Ok(graph) => graph,
			Err(err) => {
				log::error!("rejecting topology: {}", err);
				error.set(Some(err));
				return;
			}
		};
		error.set(None);

		if let Some(ref mut s) = *state_init.borrow_mut() {
			s.replace_graph(graph);
			sync_panel(s);
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(450.0)
			}),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("2d canvas context unavailable");
			return;
		};
		*state_init.borrow_mut() = Some(TopologyState::new(graph, w, h, config.clone()));

		let (state_anim, running_anim) = (state_init.clone(), running_init.clone());
		let request = move |win: &web_sys::Window| {
			let id = animate
				.try_with_value(|cb| {
					cb.as_ref()
						.and_then(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
				})
				.flatten();
			frame.try_set_value(id);
		};
		animate.set_value(Some(Closure::new(move |timestamp: f64| {
			if !running_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(timestamp);
				match s.scene() {
					Ok(scene) => render::render(s, &scene, &ctx),
					Err(err) => {
						log::error!("render failed: {}", err);
						error.set(Some(err));
						return;
					}
				}
			}
			if let Some(win) = web_sys::window() {
				request(&win);
			}
		})));
		request(&window);
	});

	let pointer = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.pointer_moved(x, y) {
				sync_panel(s);
			}
			let next = s.cursor(x, y);
			if cursor.get_untracked() != next {
				cursor.set(next);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			if s.pointer_left() {
				sync_panel(s);
			}
		}
		cursor.set("default");
	};

	let state_click = state.clone();
	let navigate = use_navigate();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		let navigator =
			|command: NavigationCommand| navigate(&command.route(), NavigateOptions::default());
		if let Some(ref s) = *state_click.borrow() {
			s.click(x, y, &navigator);
		}
	};

	view! {
		<div class="topology-canvas">
			<canvas
				node_ref=canvas_ref
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				style=move || format!("display: block; cursor: {};", cursor.get())
			/>
			<AnimatedShow
				when=Signal::derive(move || panel.with(Option::is_some))
				show_class="detail-panel-enter"
				hide_class="detail-panel-exit"
				hide_delay=Duration::from_millis(200)
			>
				{move || shown_panel.get().map(|panel| view! { <LinkDetail panel=panel /> })}
			</AnimatedShow>
			{move || error.get().map_or(Ok(()), Err)}
		</div>
	}
}

/// Floating live-status card for the focused link.
#[component]
fn LinkDetail(panel: DetailPanel) -> impl IntoView {
	let accent = panel.severity.color();
	view! {
		<div class="detail-panel">
			<h4>"Link status"</h4>
			<p class="detail-panel-endpoints">{panel.endpoints_label()}</p>
			<div class="detail-panel-row">
				<span>"Usage"</span>
				<span style=format!("color: {accent}; font-weight: bold;")>
					{format!("{}%", panel.usage)}
				</span>
			</div>
			<div class="usage-bar">
				<div
					class="usage-bar-fill"
					style=format!(
						"width: {}; background-color: {accent};",
						panel.usage_bar_width(),
					)
				/>
			</div>
			<div class="detail-panel-row">
				<span>"Traffic"</span>
				<span class="mono">{panel.traffic}</span>
			</div>
		</div>
	}
}
