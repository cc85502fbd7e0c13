//! Layered floor map: graph, routing, projection and the canvas that draws them.

mod building;
mod component;
mod error;
mod graph;
mod projection;
mod render;
mod router;
mod state;
mod surface;
mod types;

pub use building::Building;
pub use component::FloorMapCanvas;
pub use error::{Endpoint, GraphError, RouteError};
pub use graph::Graph;
pub use projection::{ProjectionConfig, Projector, ScreenPoint};
pub use render::{EdgeKind, MapEdge, MapStyle, render, visible_edges};
pub use router::{RouteRequest, find_route, request_route};
pub use state::{
	FloorMapState, MIN_PINCH_DISTANCE, PanState, PinchState, RouteHighlight, ViewTransform,
	Viewport, ZoomLimits, wheel_factor,
};
pub use surface::DrawingSurface;
pub use types::{Floor, Point, PointId, Role, Route};
