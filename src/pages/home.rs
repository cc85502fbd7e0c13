use std::sync::Arc;

use leptos::prelude::*;
use log::error;

use crate::components::floor_map::{Building, FloorMapCanvas, Route, RouteRequest, request_route};

fn point_options(ids: &[String]) -> impl IntoView + use<> {
	ids.iter()
		.map(|id| view! { <option value=id.clone()>{id.clone()}</option> })
		.collect_view()
}

/// Start/goal selection, route text and the map itself.
#[component]
fn RoutePlanner(building: Arc<Building>) -> impl IntoView {
	let (start, set_start) = signal(String::new());
	let (goal, set_goal) = signal(String::new());
	let (message, set_message) = signal(String::new());
	let route = RwSignal::new(None::<Route>);
	let ids: Vec<String> = building.graph.ids().map(str::to_string).collect();

	let planner = building.clone();
	let on_find = move |_| match request_route(&planner.graph, &start.get(), &goal.get()) {
		Ok(outcome) => {
			set_message.set(outcome.message());
			if outcome != RouteRequest::MissingSelection {
				route.set(outcome.route().cloned());
			}
		}
		Err(err) => {
			error!("route request rejected: {err}");
			set_message.set(err.to_string());
		}
	};

	view! {
		<div class="route-controls">
			<label>
				"From "
				<select id="start" on:change=move |ev| set_start.set(event_target_value(&ev))>
					<option value="">"-- select --"</option>
					{point_options(&ids)}
				</select>
			</label>
			<label>
				"To "
				<select id="end" on:change=move |ev| set_goal.set(event_target_value(&ev))>
					<option value="">"-- select --"</option>
					{point_options(&ids)}
				</select>
			</label>
			<button id="find-route" on:click=on_find>"Find route"</button>
			<p id="result" class="route-result">{move || message.get()}</p>
		</div>
		<div class="map-container">
			<FloorMapCanvas building=building route=route />
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let loaded = Building::bundled().map(Arc::new).inspect_err(|err| {
		error!("building definition rejected: {err}");
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"The building map could not be loaded"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="floor-map-page">
				<h1>"Indoor Route Finder"</h1>
				{loaded.map(|building| view! { <RoutePlanner building=building /> })}
			</div>
		</ErrorBoundary>
	}
}
