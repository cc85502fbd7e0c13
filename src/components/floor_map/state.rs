use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use super::graph::Graph;
use super::projection::{ProjectionConfig, Projector, ScreenPoint};
use super::render::MapStyle;
use super::types::{PointId, Route};

/// Finger distances below this are treated as touching and ignored.
pub const MIN_PINCH_DISTANCE: f64 = 1.0;

/// Bounds for the zoom scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
	pub min: f64,
	pub max: f64,
}

impl Default for ZoomLimits {
	fn default() -> Self {
		Self { min: 0.1, max: 10.0 }
	}
}

/// Pan offset and zoom scale; `screen = (x, y) + k * projected`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Where a projected point lands on screen.
	pub fn to_screen(&self, p: ScreenPoint) -> ScreenPoint {
		ScreenPoint::new(self.x + self.k * p.x, self.y + self.k * p.y)
	}

	/// Projected point currently under screen position `s`.
	pub fn to_local(&self, s: ScreenPoint) -> ScreenPoint {
		ScreenPoint::new((s.x - self.x) / self.k, (s.y - self.y) / self.k)
	}

	/// Moves the view by a screen-space delta.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		if dx.is_finite() && dy.is_finite() {
			self.x += dx;
			self.y += dy;
		}
	}

	/// Multiplies the scale by `factor`, keeping the point under `center`
	/// fixed. Returns whether anything changed.
	pub fn zoom_at(&mut self, center: ScreenPoint, factor: f64, limits: ZoomLimits) -> bool {
		if !factor.is_finite() || factor <= 0.0 || !center.x.is_finite() || !center.y.is_finite() {
			return false;
		}
		let new_k = (self.k * factor).clamp(limits.min, limits.max);
		if new_k == self.k {
			return false;
		}
		let ratio = new_k / self.k;
		self.x = center.x - (center.x - self.x) * ratio;
		self.y = center.y - (center.y - self.y) * ratio;
		self.k = new_k;
		true
	}
}

/// Scale step for one wheel tick.
pub fn wheel_factor(delta_y: f64) -> f64 {
	if delta_y > 0.0 {
		0.9
	} else if delta_y < 0.0 {
		1.1
	} else {
		1.0
	}
}

/// CSS size of the canvas and the display's pixel density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	pub pixel_ratio: f64,
}

impl Viewport {
	/// Builds a viewport, falling back to a ratio of 1 for nonsense input.
	pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
		let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
			pixel_ratio
		} else {
			1.0
		};
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
			pixel_ratio,
		}
	}

	/// Backing store size in device pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		(
			(self.width * self.pixel_ratio).round() as u32,
			(self.height * self.pixel_ratio).round() as u32,
		)
	}
}

/// Points and legs of the current route, for O(1) lookups while drawing.
#[derive(Clone, Debug, Default)]
pub struct RouteHighlight {
	points: HashSet<PointId>,
	legs: HashSet<(PointId, PointId)>,
}

fn leg_key(a: &str, b: &str) -> (PointId, PointId) {
	if a <= b {
		(a.to_string(), b.to_string())
	} else {
		(b.to_string(), a.to_string())
	}
}

impl RouteHighlight {
	/// Collects the points and legs of `route`.
	pub fn new(route: Option<&Route>) -> Self {
		let Some(route) = route else {
			return Self::default();
		};
		Self {
			points: route.points().iter().cloned().collect(),
			legs: route.legs().map(|(a, b)| leg_key(a, b)).collect(),
		}
	}

	/// Whether `id` lies on the route.
	pub fn has_point(&self, id: &str) -> bool {
		self.points.contains(id)
	}

	/// Whether `a` and `b` are consecutive on the route, in either order.
	pub fn has_leg(&self, a: &str, b: &str) -> bool {
		self.legs.contains(&leg_key(a, b))
	}

	/// Whether nothing is highlighted.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub pointer_id: i32,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PinchState {
	pub active: bool,
	pub last_distance: f64,
	pub last_center: ScreenPoint,
}

/// Everything the canvas needs to draw a frame and react to input.
pub struct FloorMapState {
	pub graph: Arc<Graph>,
	pub projector: Projector,
	pub style: MapStyle,
	pub limits: ZoomLimits,
	pub transform: ViewTransform,
	pub viewport: Viewport,
	pub pan: PanState,
	pub pinch: PinchState,
	pub highlight: RouteHighlight,
	pointers: Vec<(i32, ScreenPoint)>,
}

impl FloorMapState {
	/// Fresh state with an identity view.
	pub fn new(graph: Arc<Graph>, projection: ProjectionConfig, viewport: Viewport) -> Self {
		let projector = Projector::new(&graph, projection);
		Self {
			graph,
			projector,
			style: MapStyle::default(),
			limits: ZoomLimits::default(),
			transform: ViewTransform::default(),
			viewport,
			pan: PanState::default(),
			pinch: PinchState::default(),
			highlight: RouteHighlight::default(),
			pointers: Vec::new(),
		}
	}

	/// Replaces the highlighted route.
	pub fn set_route(&mut self, route: Option<&Route>) {
		self.highlight = RouteHighlight::new(route);
	}

	/// New container size; the view starts over from identity.
	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		self.transform = ViewTransform::default();
		self.cancel_gestures();
	}

	/// Drops all tracked pointers.
	pub fn cancel_gestures(&mut self) {
		self.pointers.clear();
		self.pan.active = false;
		self.pinch.active = false;
	}

	/// Number of pointers currently down.
	pub fn pointer_count(&self) -> usize {
		self.pointers.len()
	}

	fn begin_pan(&mut self, pointer_id: i32, at: ScreenPoint) {
		self.pan = PanState {
			active: true,
			pointer_id,
			start_x: at.x,
			start_y: at.y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	fn pinch_geometry(&self) -> Option<(f64, ScreenPoint)> {
		let [(_, a), (_, b), ..] = self.pointers.as_slice() else {
			return None;
		};
		let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
		let center = ScreenPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
		Some((distance, center))
	}

	/// Starts measuring the pinch from the current finger pair, so a change
	/// of pair never shows up as a distance or center jump.
	fn seed_pinch(&mut self) {
		let Some((distance, center)) = self.pinch_geometry() else {
			return;
		};
		self.pan.active = false;
		self.pinch = PinchState {
			active: true,
			last_distance: distance,
			last_center: center,
		};
		debug!("pinch tracking {} pointers at distance {:.1}", self.pointers.len(), distance);
	}

	/// A pointer went down at `at` (canvas CSS pixels).
	pub fn pointer_down(&mut self, pointer_id: i32, at: ScreenPoint) {
		self.pointers.retain(|(id, _)| *id != pointer_id);
		self.pointers.push((pointer_id, at));
		if self.pointers.len() == 1 {
			self.begin_pan(pointer_id, at);
		} else {
			self.seed_pinch();
		}
	}

	/// A pointer moved; returns whether the view changed.
	pub fn pointer_move(&mut self, pointer_id: i32, at: ScreenPoint) -> bool {
		let Some(slot) = self.pointers.iter_mut().find(|(id, _)| *id == pointer_id) else {
			return false;
		};
		slot.1 = at;

		if self.pinch.active {
			return self.update_pinch();
		}
		if self.pan.active && self.pan.pointer_id == pointer_id {
			let (x, y) = (
				self.pan.transform_start_x + (at.x - self.pan.start_x),
				self.pan.transform_start_y + (at.y - self.pan.start_y),
			);
			if x.is_finite() && y.is_finite() {
				self.transform.x = x;
				self.transform.y = y;
				return true;
			}
		}
		false
	}

	fn update_pinch(&mut self) -> bool {
		let Some((distance, center)) = self.pinch_geometry() else {
			return false;
		};
		let mut changed = false;
		let last = self.pinch.last_center;
		if center.x.is_finite() && center.y.is_finite() {
			self.transform.pan_by(center.x - last.x, center.y - last.y);
			self.pinch.last_center = center;
			changed = center != last;
		}
		let usable = |d: f64| d.is_finite() && d >= MIN_PINCH_DISTANCE;
		if usable(distance) {
			if usable(self.pinch.last_distance) {
				let factor = distance / self.pinch.last_distance;
				changed |= self.transform.zoom_at(center, factor, self.limits);
			}
			self.pinch.last_distance = distance;
		}
		changed
	}

	/// A pointer was released or cancelled.
	pub fn pointer_up(&mut self, pointer_id: i32) {
		self.pointers.retain(|(id, _)| *id != pointer_id);
		match self.pointers.first().copied() {
			Some((remaining, at)) if self.pointers.len() == 1 => {
				self.pinch.active = false;
				self.begin_pan(remaining, at);
			}
			Some(_) => self.seed_pinch(),
			None => {
				self.pan.active = false;
				self.pinch.active = false;
			}
		}
	}

	/// Wheel tick at `at`; returns whether the scale changed.
	pub fn wheel(&mut self, at: ScreenPoint, delta_y: f64) -> bool {
		self.transform.zoom_at(at, wheel_factor(delta_y), self.limits)
	}
}
