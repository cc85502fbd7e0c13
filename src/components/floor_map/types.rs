use std::fmt;

use serde::Deserialize;

/// Identifier of a point, e.g. `2F-A` or `Stair1F-2`.
pub type PointId = String;

/// Floor number, 1-based as authored.
pub type Floor = i32;

/// What a point stands for on its floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// The floor's reference point; local origin for the projection.
	Anchor,
	/// A corridor junction or room access.
	Corridor,
	/// A stairwell landing linking floors.
	Stairwell,
}

/// A named location in the building graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
	/// Unique identifier.
	pub id: PointId,
	/// Local x within the floor's own frame.
	pub x: f64,
	/// Local y within the floor's own frame.
	pub y: f64,
	/// Floor the point lives on.
	pub floor: Floor,
	/// Role of the point.
	pub role: Role,
	/// Neighbor identifiers in authored order.
	pub connects: Vec<PointId>,
}

impl Point {
	/// Whether `other` is listed as a neighbor.
	pub fn connects_to(&self, other: &str) -> bool {
		self.connects.iter().any(|c| c == other)
	}
}

/// Ordered sequence of adjacent point identifiers from a start to a goal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route(Vec<PointId>);

impl Route {
	/// Wraps an already validated sequence.
	pub fn new(points: Vec<PointId>) -> Self {
		Self(points)
	}

	/// Point identifiers in travel order.
	pub fn points(&self) -> &[PointId] {
		&self.0
	}

	/// Number of edges walked.
	pub fn edge_count(&self) -> usize {
		self.0.len().saturating_sub(1)
	}

	/// Consecutive pairs along the route.
	pub fn legs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
		self.0.windows(2).map(|w| (w[0].as_str(), w[1].as_str()))
	}

	/// First point, if any.
	pub fn start(&self) -> Option<&str> {
		self.0.first().map(String::as_str)
	}

	/// Last point, if any.
	pub fn goal(&self) -> Option<&str> {
		self.0.last().map(String::as_str)
	}

	/// Whether the route contains no points.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join(" → "))
	}
}
