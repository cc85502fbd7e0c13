//! Property-based invariant tests for routing, edge listing and the view
//! transform.
//!
//! 1. A route from a point to itself is that point alone.
//! 2. Route length equals the all-pairs shortest distance.
//! 3. Unreachable pairs yield `None`, never an error.
//! 4. Forward and backward routes have the same length.
//! 5. Drawn edges = unique adjacency pairs minus anchor/anchor pairs.
//! 6. Zooming keeps the point under the zoom center fixed.
//! 7. Projection is bit-identical across calls.

use std::collections::HashSet;

use floor_route_canvas::components::floor_map::{
	Building, Graph, Point, ProjectionConfig, Projector, Role, ScreenPoint, ViewTransform,
	ZoomLimits, find_route, visible_edges,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const UNREACHABLE: usize = usize::MAX;

#[derive(Debug)]
struct Fixture {
	graph: Graph,
	dist: Vec<Vec<usize>>,
	ids: Vec<String>,
	edges: HashSet<(usize, usize)>,
}

/// Points spread over `floors` floors; the first point of each floor is its
/// anchor. `links` picks which unordered pairs are connected.
fn fixture(n: usize, floors: usize, links: &[bool]) -> Fixture {
	let ids: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
	let mut adj = vec![Vec::new(); n];
	let mut edges = HashSet::new();
	let mut k = 0;
	for i in 0..n {
		for j in (i + 1)..n {
			if links[k % links.len()] {
				adj[i].push(j);
				adj[j].push(i);
				edges.insert((i, j));
			}
			k += 1;
		}
	}

	let points = (0..n).map(|i| Point {
		id: ids[i].clone(),
		x: i as f64 * 10.0,
		y: (i % 3) as f64 * 5.0,
		floor: (i % floors) as i32 + 1,
		role: if i < floors { Role::Anchor } else { Role::Corridor },
		connects: adj[i].iter().map(|&j| ids[j].clone()).collect(),
	});
	let graph = Graph::from_points(points).unwrap();

	// Floyd-Warshall as an independent reference
	let mut dist = vec![vec![UNREACHABLE; n]; n];
	for (i, row) in dist.iter_mut().enumerate() {
		row[i] = 0;
		for &j in &adj[i] {
			row[j] = 1;
		}
	}
	for m in 0..n {
		for i in 0..n {
			for j in 0..n {
				if dist[i][m] != UNREACHABLE && dist[m][j] != UNREACHABLE {
					let via = dist[i][m] + dist[m][j];
					if via < dist[i][j] {
						dist[i][j] = via;
					}
				}
			}
		}
	}

	Fixture {
		graph,
		dist,
		ids,
		edges,
	}
}

fn fixture_strategy() -> impl Strategy<Value = Fixture> {
	(1usize..=10, 1usize..=3, prop::collection::vec(prop::bool::weighted(0.3), 1..=45))
		.prop_map(|(n, floors, links)| fixture(n.max(floors), floors, &links))
}

// ═════════════════════════════════════════════════════════════════════════
// 1–4. Routing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
	#[test]
	fn route_length_matches_reference_distance(f in fixture_strategy()) {
		let n = f.ids.len();
		for a in 0..n {
			for b in 0..n {
				let route = find_route(&f.graph, &f.ids[a], &f.ids[b]).unwrap();
				match route {
					None => {
						prop_assert_eq!(f.dist[a][b], UNREACHABLE, "{} -> {}", a, b);
					}
					Some(route) => {
						prop_assert_eq!(route.edge_count(), f.dist[a][b]);
						prop_assert_eq!(route.start(), Some(f.ids[a].as_str()));
						prop_assert_eq!(route.goal(), Some(f.ids[b].as_str()));
						for (x, y) in route.legs() {
							prop_assert!(f.graph.get(x).unwrap().connects_to(y));
						}
						if a == b {
							prop_assert_eq!(route.points(), &[f.ids[a].clone()][..]);
						}
					}
				}
			}
		}
	}
}

proptest! {
	#[test]
	fn forward_and_backward_routes_have_equal_length(f in fixture_strategy()) {
		let n = f.ids.len();
		for a in 0..n {
			for b in 0..n {
				let there = find_route(&f.graph, &f.ids[a], &f.ids[b]).unwrap();
				let back = find_route(&f.graph, &f.ids[b], &f.ids[a]).unwrap();
				prop_assert_eq!(
					there.map(|r| r.edge_count()),
					back.map(|r| r.edge_count())
				);
			}
		}
	}
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Edge listing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
	#[test]
	fn drawn_edges_are_unique_pairs_minus_anchor_pairs(f in fixture_strategy()) {
		let projector = Projector::new(&f.graph, ProjectionConfig::default());
		let anchor = |i: usize| f.graph.get(&f.ids[i]).unwrap().role == Role::Anchor;
		let suppressed = f.edges.iter().filter(|&&(a, b)| anchor(a) && anchor(b)).count();
		let drawn = visible_edges(&f.graph, &projector);
		prop_assert_eq!(drawn.len(), f.edges.len() - suppressed);

		let mut seen = HashSet::new();
		for e in &drawn {
			prop_assert!(seen.insert((e.from.id.clone(), e.to.id.clone())));
			prop_assert!(!seen.contains(&(e.to.id.clone(), e.from.id.clone())));
		}
	}
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Zoom anchor
// ═════════════════════════════════════════════════════════════════════════

proptest! {
	#[test]
	fn zoom_keeps_center_fixed(
		x in -1000.0f64..1000.0,
		y in -1000.0f64..1000.0,
		k in 0.1f64..10.0,
		cx in 0.0f64..2000.0,
		cy in 0.0f64..2000.0,
		factor in 0.5f64..2.0,
	) {
		let mut t = ViewTransform { x, y, k };
		let center = ScreenPoint::new(cx, cy);
		let local = t.to_local(center);
		t.zoom_at(center, factor, ZoomLimits::default());
		let back = t.to_screen(local);
		prop_assert!((back.x - cx).abs() < 1e-6, "x drifted: {} vs {}", back.x, cx);
		prop_assert!((back.y - cy).abs() < 1e-6, "y drifted: {} vs {}", back.y, cy);
		prop_assert!(t.k >= 0.1 && t.k <= 10.0);
	}
}

proptest! {
	#[test]
	fn zoom_never_corrupts_scale(factor in any::<f64>(), k in 0.1f64..10.0) {
		let mut t = ViewTransform { x: 0.0, y: 0.0, k };
		t.zoom_at(ScreenPoint::new(50.0, 50.0), factor, ZoomLimits::default());
		prop_assert!(t.k.is_finite() && t.k > 0.0);
		prop_assert!(t.x.is_finite() && t.y.is_finite());
	}
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Projection determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
	#[test]
	fn projection_is_deterministic(x in -1e6f64..1e6, y in -1e6f64..1e6, floor in 1i32..=3) {
		let building = Building::bundled().unwrap();
		let projector = Projector::new(&building.graph, building.projection);
		let a = projector.project(x, y, floor);
		let b = projector.project(x, y, floor);
		prop_assert_eq!(a.x.to_bits(), b.x.to_bits());
		prop_assert_eq!(a.y.to_bits(), b.y.to_bits());
	}
}

// ═════════════════════════════════════════════════════════════════════════
// Bundled building
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn bundled_building_routes_every_pair() {
	let building = Building::bundled().unwrap();
	let ids: Vec<&str> = building.graph.ids().collect();
	for a in &ids {
		assert_eq!(
			find_route(&building.graph, a, a).unwrap().unwrap().points(),
			&[a.to_string()][..]
		);
		for b in &ids {
			assert!(find_route(&building.graph, a, b).unwrap().is_some(), "{a} -> {b}");
		}
	}
}
