use super::graph::Graph;
use super::projection::{Projector, ScreenPoint};
use super::state::FloorMapState;
use super::surface::DrawingSurface;
use super::types::{Point, Role};

/// Colors, sizes and fonts of the map. Sizes are in projected units and
/// scale with zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct MapStyle {
	pub floor_fill: String,
	pub floor_outline: String,
	pub floor_outline_width: f64,
	pub floor_label_color: String,
	pub floor_label_font: String,
	pub floor_label_offset: (f64, f64),
	pub edge_color: String,
	pub edge_width: f64,
	pub route_color: String,
	pub route_width: f64,
	pub point_color: String,
	pub point_radius: f64,
	pub label_color: String,
	pub label_font: String,
	pub label_offset: (f64, f64),
}

impl Default for MapStyle {
	fn default() -> Self {
		Self {
			floor_fill: "rgba(200, 200, 200, 0.2)".into(),
			floor_outline: "#333".into(),
			floor_outline_width: 1.0,
			floor_label_color: "#000".into(),
			floor_label_font: "14px sans-serif".into(),
			floor_label_offset: (10.0, 20.0),
			edge_color: "#aaa".into(),
			edge_width: 1.0,
			route_color: "#ff5722".into(),
			route_width: 3.0,
			point_color: "#0078d7".into(),
			point_radius: 6.0,
			label_color: "#000".into(),
			label_font: "12px sans-serif".into(),
			label_offset: (8.0, -4.0),
		}
	}
}

/// How an edge is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	/// Straight line between the projected endpoints.
	Corridor,
	/// Vertical shaft between two stairwell landings.
	Stairwell,
}

/// An undirected link as it appears on the map.
#[derive(Clone, Debug)]
pub struct MapEdge<'a> {
	pub from: &'a Point,
	pub to: &'a Point,
	pub kind: EdgeKind,
	pub segment: [ScreenPoint; 2],
}

/// De-duplicated, classified edges with their projected geometry.
///
/// Links between two anchors are left out; stairwell links are straightened
/// to a vertical segment at the mean of both projected x coordinates.
pub fn visible_edges<'a>(graph: &'a Graph, projector: &Projector) -> Vec<MapEdge<'a>> {
	graph
		.links()
		.filter(|(a, b)| !(a.role == Role::Anchor && b.role == Role::Anchor))
		.map(|(from, to)| {
			let p1 = projector.project(from.x, from.y, from.floor);
			let p2 = projector.project(to.x, to.y, to.floor);
			if from.role == Role::Stairwell && to.role == Role::Stairwell {
				let x = (p1.x + p2.x) / 2.0;
				MapEdge {
					from,
					to,
					kind: EdgeKind::Stairwell,
					segment: [ScreenPoint::new(x, p1.y), ScreenPoint::new(x, p2.y)],
				}
			} else {
				MapEdge {
					from,
					to,
					kind: EdgeKind::Corridor,
					segment: [p1, p2],
				}
			}
		})
		.collect()
}

/// Repaints the whole map: floors, then edges, then points.
pub fn render<S: DrawingSurface + ?Sized>(state: &FloorMapState, surface: &mut S) {
	let viewport = &state.viewport;
	let transform = &state.transform;
	let (backing_width, backing_height) = viewport.backing_size();
	surface.clear(backing_width as f64, backing_height as f64);
	surface.save();
	surface.scale(viewport.pixel_ratio);
	surface.translate(transform.x, transform.y);
	surface.scale(transform.k);
	draw_floors(state, surface);
	draw_edges(state, surface);
	draw_points(state, surface);
	surface.restore();
}

fn draw_floors<S: DrawingSurface + ?Sized>(state: &FloorMapState, surface: &mut S) {
	let style = &state.style;
	for floor in state.graph.floors() {
		let outline = state.projector.floor_outline(floor);
		surface.fill_polygon(
			&outline,
			&style.floor_fill,
			Some((style.floor_outline.as_str(), style.floor_outline_width)),
		);
		let corner = outline[0];
		let (dx, dy) = style.floor_label_offset;
		surface.fill_text(
			&format!("{floor}F"),
			ScreenPoint::new(corner.x + dx, corner.y + dy),
			&style.floor_label_font,
			&style.floor_label_color,
		);
	}
}

fn draw_edges<S: DrawingSurface + ?Sized>(state: &FloorMapState, surface: &mut S) {
	let style = &state.style;
	for edge in visible_edges(&state.graph, &state.projector) {
		let (color, width) = if state.highlight.has_leg(&edge.from.id, &edge.to.id) {
			(&style.route_color, style.route_width)
		} else {
			(&style.edge_color, style.edge_width)
		};
		surface.stroke_polyline(&edge.segment, color, width);
	}
}

fn draw_points<S: DrawingSurface + ?Sized>(state: &FloorMapState, surface: &mut S) {
	let style = &state.style;
	let (dx, dy) = style.label_offset;
	for point in state.graph.points() {
		let p = state.projector.project(point.x, point.y, point.floor);
		let color = if state.highlight.has_point(&point.id) {
			&style.route_color
		} else {
			&style.point_color
		};
		surface.fill_circle(p, style.point_radius, color);
		surface.fill_text(
			&point.id,
			ScreenPoint::new(p.x + dx, p.y + dy),
			&style.label_font,
			&style.label_color,
		);
	}
}
