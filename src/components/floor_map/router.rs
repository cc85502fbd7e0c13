use std::collections::{HashMap, VecDeque};

use log::{debug, warn};

use super::error::{Endpoint, RouteError};
use super::graph::Graph;
use super::types::{PointId, Route};

/// Shortest route by edge count from `start` to `goal`.
///
/// Breadth-first over the authored neighbor lists; among equally short
/// routes the one discovered first in authored order wins. Points are marked
/// visited when enqueued, so each is queued at most once. `Ok(None)` means
/// both points exist but are not connected.
pub fn find_route(graph: &Graph, start: &str, goal: &str) -> Result<Option<Route>, RouteError> {
	let start = graph
		.get(start)
		.map(|p| p.id.as_str())
		.ok_or_else(|| RouteError::InvalidPoint {
			endpoint: Endpoint::Start,
			id: start.to_string(),
		})?;
	let goal = graph
		.get(goal)
		.map(|p| p.id.as_str())
		.ok_or_else(|| RouteError::InvalidPoint {
			endpoint: Endpoint::Goal,
			id: goal.to_string(),
		})?;

	// predecessor of every discovered point; the start maps to itself
	let mut came_from: HashMap<&str, &str> = HashMap::from([(start, start)]);
	let mut queue = VecDeque::from([start]);

	while let Some(current) = queue.pop_front() {
		if current == goal {
			return Ok(Some(walk_back(&came_from, start, goal)));
		}
		let Some(point) = graph.get(current) else {
			continue;
		};
		for next in &point.connects {
			let Some(next) = graph.get(next).map(|p| p.id.as_str()) else {
				continue;
			};
			if !came_from.contains_key(next) {
				came_from.insert(next, current);
				queue.push_back(next);
			}
		}
	}
	Ok(None)
}

fn walk_back(came_from: &HashMap<&str, &str>, start: &str, goal: &str) -> Route {
	let mut points: Vec<PointId> = vec![goal.to_string()];
	let mut current = goal;
	while current != start {
		match came_from.get(current) {
			Some(&prev) => {
				points.push(prev.to_string());
				current = prev;
			}
			None => break,
		}
	}
	points.reverse();
	Route::new(points)
}

/// Outcome of a user route request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteRequest {
	/// Start or goal was left empty.
	MissingSelection,
	/// A shortest route.
	Found(Route),
	/// Both points exist but nothing connects them.
	NotFound,
}

impl RouteRequest {
	/// Text shown to the user.
	pub fn message(&self) -> String {
		match self {
			RouteRequest::MissingSelection => {
				"Please select both a start and a destination.".to_string()
			}
			RouteRequest::Found(route) => format!("Route: {route}"),
			RouteRequest::NotFound => "No route found.".to_string(),
		}
	}

	/// Route to highlight, if any.
	pub fn route(&self) -> Option<&Route> {
		match self {
			RouteRequest::Found(route) => Some(route),
			_ => None,
		}
	}
}

/// Validates the selections and runs [`find_route`].
pub fn request_route(graph: &Graph, start: &str, goal: &str) -> Result<RouteRequest, RouteError> {
	if start.is_empty() || goal.is_empty() {
		return Ok(RouteRequest::MissingSelection);
	}
	match find_route(graph, start, goal)? {
		Some(route) => {
			debug!("route {} -> {}: {} edges", start, goal, route.edge_count());
			Ok(RouteRequest::Found(route))
		}
		None => {
			warn!("no route between {} and {}", start, goal);
			Ok(RouteRequest::NotFound)
		}
	}
}
