use log::trace;

use crate::error::{LayoutError, Result};
use crate::index::GraphIndex;
use crate::model::Vertex;

// squared radii 0.2, 0.4 and 0.6
const REPULSION_RANGE_SQ: f64 = 0.04;
const INNER_REST_RANGE_SQ: f64 = 0.16;
const OUTER_REST_RANGE_SQ: f64 = 0.36;
const CLOSE_REPULSION: f64 = -2.0;
const SPRING_STRENGTH: f64 = 2.0;

pub fn force_of(dist_sq: f64, is_edge: bool) -> f64 {
    if dist_sq < REPULSION_RANGE_SQ {
        CLOSE_REPULSION
    } else if dist_sq < INNER_REST_RANGE_SQ {
        0.0
    } else if dist_sq < OUTER_REST_RANGE_SQ {
        0.0
    } else if !is_edge {
        0.0
    } else {
        SPRING_STRENGTH * dist_sq
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub interacting_pairs: usize,
    pub displaced_pairs: usize,
}

impl TickSummary {
    pub fn moved(&self) -> bool {
        self.displaced_pairs > 0
    }
}

pub fn tick(vertices: &mut [Vertex], index: &GraphIndex, tick_rate_hz: f64) -> Result<TickSummary> {
    if !tick_rate_hz.is_finite() || tick_rate_hz <= 0.0 {
        return Err(LayoutError::InvalidTickRate(tick_rate_hz));
    }

    let dt = 1.0 / tick_rate_hz;
    let mut summary = TickSummary::default();

    // each pair sees positions written by earlier pairs of the same tick
    for i in 0..vertices.len() {
        for j in (i + 1)..vertices.len() {
            let (left, right) = vertices.split_at_mut(j);
            let from = &mut left[i];
            let to = &mut right[0];

            let dx = from.x - to.x;
            let dy = from.y - to.y;
            let dist_sq = dx * dx + dy * dy;

            let force = force_of(dist_sq, index.is_adjacent(from.id, to.id));
            if force == 0.0 {
                continue;
            }
            summary.interacting_pairs += 1;

            let xd = dx * force * dt;
            let yd = dy * force * dt;

            match (from.fixed, to.fixed) {
                (true, true) => continue,
                (true, false) => {
                    to.x += 2.0 * xd;
                    to.y += 2.0 * yd;
                }
                (false, true) => {
                    from.x -= 2.0 * xd;
                    from.y -= 2.0 * yd;
                }
                (false, false) => {
                    from.x -= xd;
                    from.y -= yd;
                    to.x += xd;
                    to.y += yd;
                }
            }
            summary.displaced_pairs += 1;
        }
    }

    trace!(
        "tick at {tick_rate_hz} Hz: {} interacting pairs, {} displaced",
        summary.interacting_pairs, summary.displaced_pairs
    );
    Ok(summary)
}
