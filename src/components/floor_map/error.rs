use std::fmt;

use super::types::{Floor, PointId};

/// Building definition that cannot be turned into a valid graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	/// Definition text failed to parse.
	#[error("building definition is not valid JSON: {0}")]
	Parse(#[from] serde_json::Error),
	/// No points at all.
	#[error("building definition has no points")]
	Empty,
	/// Two points share an identifier.
	#[error("point `{point}` is defined more than once")]
	DuplicatePoint { point: PointId },
	/// Neighbor reference to a missing point.
	#[error("point `{point}` connects to unknown point `{neighbor}`")]
	DanglingNeighbor { point: PointId, neighbor: PointId },
	/// Link listed on one side only.
	#[error("point `{from}` connects to `{to}` but not the other way round")]
	AsymmetricLink { from: PointId, to: PointId },
	/// Point listed as its own neighbor.
	#[error("point `{point}` connects to itself")]
	SelfLink { point: PointId },
	/// Floor without an anchor point.
	#[error("floor {floor} has no anchor point")]
	MissingAnchor { floor: Floor },
	/// Floor with more than one anchor point.
	#[error("floor {floor} has two anchor points: `{first}` and `{second}`")]
	DuplicateAnchor {
		floor: Floor,
		first: PointId,
		second: PointId,
	},
}

/// Which end of a route request was at fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
	/// Where the route begins.
	Start,
	/// Where the route ends.
	Goal,
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Endpoint::Start => f.write_str("start"),
			Endpoint::Goal => f.write_str("goal"),
		}
	}
}

/// Route request naming a point the graph does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
	/// Identifier not present in the graph.
	#[error("{endpoint} point `{id}` is not in the building graph")]
	InvalidPoint { endpoint: Endpoint, id: PointId },
}
