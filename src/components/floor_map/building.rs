//! Building definitions: the JSON shape the floor graph is authored in.

use std::sync::Arc;

use indexmap::IndexMap;
use log::info;
use serde::Deserialize;

use super::error::GraphError;
use super::graph::Graph;
use super::projection::ProjectionConfig;
use super::types::{Floor, Point, PointId, Role};

const DEFAULT_BUILDING: &str = include_str!("../../../assets/building.json");

#[derive(Debug, Deserialize)]
struct PointSpec {
	x: f64,
	y: f64,
	floor: Floor,
	role: Role,
	#[serde(default)]
	connects: Vec<PointId>,
}

#[derive(Debug, Deserialize)]
struct BuildingSpec {
	#[serde(default)]
	projection: ProjectionConfig,
	points: IndexMap<PointId, PointSpec>,
}

/// A validated building: its point graph and how to project it.
#[derive(Clone, Debug)]
pub struct Building {
	/// Point connectivity, shared with every canvas showing the building.
	pub graph: Arc<Graph>,
	/// Projection constants, defaulted where the definition is silent.
	pub projection: ProjectionConfig,
}

impl Building {
	/// Parses and validates a JSON building definition.
	///
	/// Point order in the `points` object is kept; it drives both the order
	/// of the selection lists and BFS tie-breaking.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		let spec: BuildingSpec = serde_json::from_str(text)?;
		let points = spec
			.points
			.into_iter()
			.map(|(id, p)| {
				let point = Point {
					id: id.clone(),
					x: p.x,
					y: p.y,
					floor: p.floor,
					role: p.role,
					connects: p.connects,
				};
				(id, point)
			})
			.collect();
		let graph = Graph::from_map(points)?;
		Ok(Self {
			graph: Arc::new(graph),
			projection: spec.projection,
		})
	}

	/// The three-floor building shipped with the app.
	pub fn bundled() -> Result<Self, GraphError> {
		let building = Self::from_json(DEFAULT_BUILDING)?;
		let (lowest, highest) = building.graph.floor_range();
		info!(
			"Loaded building: {} points, floors {}..={}",
			building.graph.len(),
			lowest,
			highest
		);
		Ok(building)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_building_is_valid() {
		let building = Building::bundled().unwrap();
		assert_eq!(building.graph.len(), 15);
		assert_eq!(building.graph.floor_range(), (1, 3));
		for floor in 1..=3 {
			let anchor = building.graph.anchor(floor).unwrap();
			assert_eq!(anchor.id, format!("{floor}F-B"));
		}
		assert_eq!(building.graph.ids().next(), Some("1F-A"));
		assert_eq!(building.graph.ids().last(), Some("Stair3F-2"));
	}

	#[test]
	fn keeps_authored_neighbor_order() {
		let building = Building::bundled().unwrap();
		let stair = building.graph.get("Stair2F-1").unwrap();
		assert_eq!(stair.connects, vec!["2F-A", "Stair1F-1", "Stair3F-1"]);
		assert_eq!(stair.role, Role::Stairwell);
	}

	#[test]
	fn projection_defaults_when_omitted() {
		let text = r#"{ "points": { "G-B": { "x": 0, "y": 0, "floor": 0, "role": "anchor" } } }"#;
		let building = Building::from_json(text).unwrap();
		assert_eq!(building.projection, ProjectionConfig::default());
		assert!(building.graph.get("G-B").unwrap().connects.is_empty());
	}

	#[test]
	fn partial_projection_overrides() {
		let text = r#"{
			"projection": { "skew": 0.25 },
			"points": { "G-B": { "x": 0, "y": 0, "floor": 0, "role": "anchor" } }
		}"#;
		let building = Building::from_json(text).unwrap();
		assert_eq!(building.projection.skew, 0.25);
		assert_eq!(
			building.projection.floor_spacing,
			ProjectionConfig::default().floor_spacing
		);
	}

	#[test]
	fn rejects_unknown_role_and_bad_json() {
		let text = r#"{ "points": { "X": { "x": 0, "y": 0, "floor": 1, "role": "lift" } } }"#;
		assert!(matches!(
			Building::from_json(text).unwrap_err(),
			GraphError::Parse(_)
		));
		assert!(matches!(
			Building::from_json("{").unwrap_err(),
			GraphError::Parse(_)
		));
	}

	#[test]
	fn rejects_dangling_reference_in_json() {
		let text = r#"{ "points": {
			"1F-B": { "x": 0, "y": 0, "floor": 1, "role": "anchor", "connects": ["1F-Z"] }
		} }"#;
		assert!(matches!(
			Building::from_json(text).unwrap_err(),
			GraphError::DanglingNeighbor { .. }
		));
	}
}
