use std::collections::BTreeMap;

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::debug;

use super::error::GraphError;
use super::types::{Floor, Point, PointId, Role};

/// Immutable, validated point connectivity graph.
///
/// Iteration order is the authoring order of the points, which is also the
/// total order used to draw each undirected link once.
#[derive(Clone, Debug)]
pub struct Graph {
	points: IndexMap<PointId, Point>,
	anchors: BTreeMap<Floor, PointId>,
}

impl Graph {
	/// Builds a graph from points in authoring order and validates it.
	pub fn from_points(points: impl IntoIterator<Item = Point>) -> Result<Self, GraphError> {
		let mut map = IndexMap::new();
		for point in points {
			match map.entry(point.id.clone()) {
				Entry::Occupied(_) => return Err(GraphError::DuplicatePoint { point: point.id }),
				Entry::Vacant(slot) => {
					slot.insert(point);
				}
			}
		}
		Self::from_map(map)
	}

	pub(super) fn from_map(points: IndexMap<PointId, Point>) -> Result<Self, GraphError> {
		if points.is_empty() {
			return Err(GraphError::Empty);
		}

		for point in points.values() {
			for neighbor in &point.connects {
				if *neighbor == point.id {
					return Err(GraphError::SelfLink {
						point: point.id.clone(),
					});
				}
				let Some(other) = points.get(neighbor) else {
					return Err(GraphError::DanglingNeighbor {
						point: point.id.clone(),
						neighbor: neighbor.clone(),
					});
				};
				if !other.connects_to(&point.id) {
					return Err(GraphError::AsymmetricLink {
						from: point.id.clone(),
						to: neighbor.clone(),
					});
				}
			}
		}

		let mut anchors: BTreeMap<Floor, PointId> = BTreeMap::new();
		for point in points.values().filter(|p| p.role == Role::Anchor) {
			if let Some(first) = anchors.get(&point.floor) {
				return Err(GraphError::DuplicateAnchor {
					floor: point.floor,
					first: first.clone(),
					second: point.id.clone(),
				});
			}
			anchors.insert(point.floor, point.id.clone());
		}
		for point in points.values() {
			if !anchors.contains_key(&point.floor) {
				return Err(GraphError::MissingAnchor { floor: point.floor });
			}
		}

		debug!(
			"graph validated: {} points on {} floors",
			points.len(),
			anchors.len()
		);
		Ok(Self { points, anchors })
	}

	/// Point named `id`.
	pub fn get(&self, id: &str) -> Option<&Point> {
		self.points.get(id)
	}

	/// Whether `id` names a point.
	pub fn contains(&self, id: &str) -> bool {
		self.points.contains_key(id)
	}

	/// Number of points.
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// Always false for a validated graph.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Points in authoring order.
	pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
		self.points.values()
	}

	/// Identifiers in authoring order, as offered to the user.
	pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
		self.points.keys().map(String::as_str)
	}

	/// Position of `id` in authoring order.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.points.get_index_of(id)
	}

	/// Floors that carry points, lowest first.
	pub fn floors(&self) -> impl Iterator<Item = Floor> + '_ {
		self.anchors.keys().copied()
	}

	/// Lowest and highest floor.
	pub fn floor_range(&self) -> (Floor, Floor) {
		let lowest = self.anchors.keys().next().copied().unwrap_or_default();
		let highest = self.anchors.keys().next_back().copied().unwrap_or(lowest);
		(lowest, highest)
	}

	/// Anchor point of `floor`.
	pub fn anchor(&self, floor: Floor) -> Option<&Point> {
		self.anchors.get(&floor).and_then(|id| self.points.get(id))
	}

	/// Each undirected link once, first endpoint preceding the second in
	/// authoring order. Neighbors missing from the graph are skipped.
	pub fn links(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
		self.points.values().enumerate().flat_map(move |(i, point)| {
			point.connects.iter().filter_map(move |neighbor| {
				let (j, _, other) = self.points.get_full(neighbor)?;
				(i < j).then_some((point, other))
			})
		})
	}
}
