use std::f64::consts::{PI, TAU};

use log::debug;

use crate::config::EngineConfig;
use crate::index::GraphIndex;
use crate::model::Vertex;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementParams {
    pub seed: [f64; 2],
    pub child_distance: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for PlacementParams {
    fn from(config: &EngineConfig) -> Self {
        Self {
            seed: config.seed,
            child_distance: config.child_distance,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementSummary {
    pub components: usize,
    pub placed: usize,
    pub max_depth: usize,
}

#[derive(Default)]
struct Fan {
    children: Vec<(usize, f64)>,
    next: usize,
}

pub fn place_initial(
    vertices: &mut [Vertex],
    index: &GraphIndex,
    params: PlacementParams,
) -> PlacementSummary {
    let mut summary = PlacementSummary::default();
    let mut visited = vec![false; vertices.len()];
    let mut stack: Vec<Fan> = Vec::new();

    for seed in 0..vertices.len() {
        if visited[seed] {
            continue;
        }

        visited[seed] = true;
        vertices[seed].x = params.seed[0];
        vertices[seed].y = params.seed[1];
        summary.components += 1;
        summary.placed += 1;

        stack.push(fan_out(vertices, index, seed, 0.0, &mut visited, params));
        while let Some(fan) = stack.last_mut() {
            let Some(&(child, angle)) = fan.children.get(fan.next) else {
                stack.pop();
                continue;
            };
            fan.next += 1;
            summary.placed += 1;

            let next = fan_out(vertices, index, child, angle, &mut visited, params);
            stack.push(next);
            summary.max_depth = summary.max_depth.max(stack.len() - 1);
        }
    }

    debug!(
        "placed {} vertices across {} component(s), deepest fan chain {}",
        summary.placed, summary.components, summary.max_depth
    );
    summary
}

fn fan_out(
    vertices: &mut [Vertex],
    index: &GraphIndex,
    slot: usize,
    parent_angle: f64,
    visited: &mut [bool],
    params: PlacementParams,
) -> Fan {
    let id = vertices[slot].id;
    let total = index.degree(id);
    if total == 0 {
        return Fan::default();
    }

    let (origin_x, origin_y) = vertices[slot].position();
    // placed neighbors still reserve their share of the circle
    let theta = TAU / total as f64;
    let mut children = Vec::new();

    for (neighbor, _edge) in index.neighbors(id) {
        let Some(child) = index.slot_of(neighbor) else {
            continue;
        };
        let Some(seen) = visited.get_mut(child) else {
            continue;
        };
        if *seen {
            continue;
        }
        *seen = true;

        let angle = theta * (children.len() + 1) as f64 + parent_angle;
        let vertex = &mut vertices[child];
        vertex.x = origin_x + angle.cos() * params.child_distance;
        vertex.y = origin_y + angle.sin() * params.child_distance;
        children.push((child, angle - PI));
    }

    Fan { children, next: 0 }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::model::{Edge, VertexId};

    fn graph(ids: &[VertexId], pairs: &[(VertexId, VertexId)]) -> (Vec<Vertex>, GraphIndex) {
        let vertices = ids
            .iter()
            .map(|&id| Vertex::new(id, format!("Node {id}")))
            .collect::<Vec<_>>();
        let edges = pairs
            .iter()
            .map(|&(from, to)| Edge::undirected(from, to))
            .collect::<Vec<_>>();
        let index = GraphIndex::build(&vertices, &edges).unwrap();
        (vertices, index)
    }

    #[test]
    fn single_edge_places_neighbor_at_full_turn() {
        let (mut vertices, index) = graph(&[0, 1], &[(0, 1)]);
        let summary = place_initial(&mut vertices, &index, PlacementParams::default());

        assert_eq!(vertices[0].position(), (1.0, 1.0));
        assert_abs_diff_eq!(vertices[1].x, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(vertices[1].y, 1.0, epsilon = 1e-12);
        assert_eq!(summary.components, 1);
        assert_eq!(summary.placed, 2);
    }

    #[test]
    fn star_spreads_leaves_evenly() {
        let (mut vertices, index) = graph(&[0, 1, 2, 3, 4], &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        place_initial(&mut vertices, &index, PlacementParams::default());

        let expected = [(1.0, 1.5), (0.5, 1.0), (1.0, 0.5), (1.5, 1.0)];
        for (vertex, (x, y)) in vertices[1..].iter().zip(expected) {
            assert_abs_diff_eq!(vertex.x, x, epsilon = 1e-12);
            assert_abs_diff_eq!(vertex.y, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn child_fan_is_rotated_away_from_parent() {
        let (mut vertices, index) = graph(&[0, 1, 2], &[(0, 1), (1, 2)]);
        place_initial(&mut vertices, &index, PlacementParams::default());

        assert_abs_diff_eq!(vertices[1].x, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(vertices[2].x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vertices[2].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cycle_skips_back_edges() {
        let (mut vertices, index) = graph(&[0, 1, 2], &[(0, 1), (1, 2), (2, 0)]);
        let summary = place_initial(&mut vertices, &index, PlacementParams::default());

        assert_abs_diff_eq!(vertices[1].x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(vertices[1].y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vertices[2].x, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(vertices[2].y, 1.0, epsilon = 1e-12);
        assert_eq!(summary.placed, 3);
        assert_eq!(summary.max_depth, 1);
    }

    #[test]
    fn every_component_gets_its_own_seed() {
        let (mut vertices, index) = graph(&[0, 1, 2, 3, 4], &[(0, 1), (2, 3)]);
        let summary = place_initial(&mut vertices, &index, PlacementParams::default());

        assert_eq!(summary.components, 3);
        assert_eq!(summary.placed, 5);
        assert_eq!(vertices[2].position(), (1.0, 1.0));
        assert_eq!(vertices[4].position(), (1.0, 1.0));
    }

    #[test]
    fn self_loop_reserves_a_share_of_the_circle() {
        let (mut vertices, index) = graph(&[0, 1], &[(0, 0), (0, 1)]);
        place_initial(&mut vertices, &index, PlacementParams::default());

        // two neighbor entries (itself and 1), so 1 lands at theta = pi
        assert_abs_diff_eq!(vertices[1].x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(vertices[1].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn long_chain_does_not_exhaust_the_call_stack() {
        let ids = (0..50_000).collect::<Vec<VertexId>>();
        let pairs = ids.windows(2).map(|w| (w[0], w[1])).collect::<Vec<_>>();
        let (mut vertices, index) = graph(&ids, &pairs);
        let summary = place_initial(&mut vertices, &index, PlacementParams::default());

        assert_eq!(summary.placed, ids.len());
        assert_eq!(summary.max_depth, ids.len() - 1);
        assert!(vertices.iter().all(|v| v.x.is_finite() && v.y.is_finite()));
    }

    #[test]
    fn custom_seed_and_distance_are_honoured() {
        let (mut vertices, index) = graph(&[0, 1], &[(0, 1)]);
        let params = PlacementParams {
            seed: [-3.0, 2.0],
            child_distance: 2.0,
        };
        place_initial(&mut vertices, &index, params);

        assert_eq!(vertices[0].position(), (-3.0, 2.0));
        assert_abs_diff_eq!(vertices[1].x, -1.0, epsilon = 1e-12);
    }
}
