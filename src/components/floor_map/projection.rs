use std::collections::BTreeMap;

use serde::Deserialize;

use super::graph::Graph;
use super::types::Floor;

/// A point on the drawing surface before the view transform is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl ScreenPoint {
	/// Shorthand constructor.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Constants of the layered axonometric projection.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
	/// Screen x of the pivot floor's anchor.
	pub origin_x: f64,
	/// Screen y of the pivot floor's anchor.
	pub origin_y: f64,
	/// Horizontal shift per unit of local y.
	pub skew: f64,
	/// Vertical compression of local x + y.
	pub compression: f64,
	/// Vertical pixels between stacked floors.
	pub floor_spacing: f64,
	/// Logical width of a floor plate.
	pub floor_width: f64,
	/// Logical depth of a floor plate.
	pub floor_height: f64,
}

impl Default for ProjectionConfig {
	fn default() -> Self {
		Self {
			origin_x: 250.0,
			origin_y: 200.0,
			skew: 0.5,
			compression: 0.3,
			floor_spacing: 80.0,
			floor_width: 500.0,
			floor_height: 200.0,
		}
	}
}

/// Maps local `(x, y, floor)` coordinates to pre-transform screen points.
///
/// Every floor is projected relative to its own anchor, so floors with
/// different local frames still line up on the shared pivot. The middle floor
/// sits at the configured origin; higher floors are drawn above it.
#[derive(Clone, Debug)]
pub struct Projector {
	config: ProjectionConfig,
	anchors: BTreeMap<Floor, (f64, f64)>,
	pivot: f64,
}

impl Projector {
	/// Captures the anchor of every floor of `graph`.
	pub fn new(graph: &Graph, config: ProjectionConfig) -> Self {
		let anchors = graph
			.floors()
			.filter_map(|floor| graph.anchor(floor).map(|a| (floor, (a.x, a.y))))
			.collect();
		let (lowest, highest) = graph.floor_range();
		Self {
			config,
			anchors,
			pivot: (lowest as f64 + highest as f64) / 2.0,
		}
	}

	/// Projection constants in use.
	pub fn config(&self) -> &ProjectionConfig {
		&self.config
	}

	/// Local origin of `floor`; `(0, 0)` for floors without an anchor.
	pub fn anchor(&self, floor: Floor) -> (f64, f64) {
		self.anchors.get(&floor).copied().unwrap_or((0.0, 0.0))
	}

	/// Projects a local coordinate on `floor`.
	pub fn project(&self, x: f64, y: f64, floor: Floor) -> ScreenPoint {
		let c = &self.config;
		let (cx, cy) = self.anchor(floor);
		let (dx, dy) = (x - cx, y - cy);
		ScreenPoint {
			x: c.origin_x + dx - dy * c.skew,
			y: c.origin_y + (dx + dy) * c.compression - (floor as f64 - self.pivot) * c.floor_spacing,
		}
	}

	/// Corners of the floor plate around the anchor: top-left, top-right,
	/// bottom-right, bottom-left in local terms.
	pub fn floor_outline(&self, floor: Floor) -> [ScreenPoint; 4] {
		let (cx, cy) = self.anchor(floor);
		let (hw, hh) = (self.config.floor_width / 2.0, self.config.floor_height / 2.0);
		[
			self.project(cx - hw, cy - hh, floor),
			self.project(cx + hw, cy - hh, floor),
			self.project(cx + hw, cy + hh, floor),
			self.project(cx - hw, cy + hh, floor),
		]
	}
}
