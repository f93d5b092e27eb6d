//! Initial embedding: depth-first ring placement with rejection sampling.
//!
//! Every unplaced neighbor of a placed node gets the next level and a point on its ring, sampled
//! on the side of the parent given by the relation (children above, prerequisites below). A
//! candidate is rejected when the segment from the parent, or any drawn edge it would complete,
//! crosses an edge whose endpoints are both already placed. When `max_placement_attempts` draws
//! near the parent all cross, as many more are drawn from the whole ring. If those fail too the
//! candidate with the fewest crossings is kept and reported.

use crate::config::LayoutConfig;
use crate::error::Warning;
use crate::geom::{Vec2, segments_intersect_with_tolerance};
use crate::graph::Graph;
use crate::rng::XorShift64Star;

pub(crate) struct Placer<'a> {
    cfg: &'a LayoutConfig,
    rng: XorShift64Star,
    visited: Vec<bool>,
    warnings: &'a mut Vec<Warning>,
}

impl<'a> Placer<'a> {
    pub(crate) fn new(graph: &Graph, cfg: &'a LayoutConfig, warnings: &'a mut Vec<Warning>) -> Self {
        Self {
            cfg,
            rng: XorShift64Star::new(cfg.random_seed),
            visited: vec![false; graph.nodes.len()],
            warnings,
        }
    }

    /// Pins the root at the origin on level 0 and places everything reachable from it.
    pub(crate) fn place_from_root(&mut self, graph: &mut Graph) {
        let root = graph.root;
        let node = &mut graph.nodes[root];
        node.level = Some(0);
        node.pos = Vec2::zeros();
        node.vel = Vec2::zeros();
        node.initial_sign = Vec2::new(1.0, 1.0);
        self.visited[root] = true;

        self.place_children(graph, root);
    }

    pub(crate) fn place_children(&mut self, graph: &mut Graph, placed: usize) {
        let pending: Vec<usize> = graph.nodes[placed]
            .neighbors()
            .filter(|&idx| !self.visited[idx])
            .collect();
        if pending.is_empty() {
            return;
        }

        let level = graph.nodes[placed].level.unwrap_or(0) + 1;
        for &idx in &pending {
            self.visited[idx] = true;
            self.sample_ring_position(graph, placed, idx, level);
        }

        for &idx in &pending {
            self.place_children(graph, idx);
        }
    }

    /// Level and position are assigned together, so the crossing checks never see `idx` as
    /// placed.
    fn sample_ring_position(&mut self, graph: &mut Graph, placed: usize, idx: usize, level: u32) {
        let ring_unit = self.cfg.ring_unit;
        let eps = self.cfg.orientation_epsilon;
        let radius = f64::from(level) * ring_unit;
        let origin = graph.nodes[placed].pos;
        let bias = if graph.nodes[placed].children.contains(&idx) {
            1.0
        } else {
            -1.0
        };

        let segments = graph.placed_segments();
        // Other drawn edges this node completes, besides the one to `placed`.
        let anchors: Vec<Vec2> = graph
            .edges
            .iter()
            .filter_map(|e| match (e.from == idx, e.to == idx) {
                (true, false) => Some(e.to),
                (false, true) => Some(e.from),
                _ => None,
            })
            .filter(|&other| other != placed && graph.nodes[other].is_placed())
            .map(|other| graph.nodes[other].pos)
            .collect();

        let mut best: Option<(usize, Vec2)> = None;
        let mut attempts = 0;
        'bands: for band in [Some(bias), None] {
            if band.is_none() {
                tracing::debug!(
                    label = %graph.nodes[idx].label,
                    "widening placement to the whole ring"
                );
            }
            for _ in 0..self.cfg.max_placement_attempts {
                attempts += 1;
                let y = match band {
                    Some(bias) => (origin.y + bias * ring_unit * self.rng.next_f64_unit())
                        .clamp(-radius, radius),
                    None => radius * (2.0 * self.rng.next_f64_unit() - 1.0),
                };
                let x = (radius * radius - y * y).max(0.0).sqrt() * self.rng.next_sign();
                let candidate = Vec2::new(x, y);

                let crossings = std::iter::once(origin)
                    .chain(anchors.iter().copied())
                    .map(|from| {
                        segments
                            .iter()
                            .filter(|&&(a, b)| {
                                segments_intersect_with_tolerance(from, candidate, a, b, eps)
                            })
                            .count()
                    })
                    .sum::<usize>();
                if best.is_none_or(|(fewest, _)| crossings < fewest) {
                    best = Some((crossings, candidate));
                }
                if crossings == 0 {
                    break 'bands;
                }
            }
        }

        let Some((crossings, pos)) = best else {
            return;
        };
        if crossings > 0 {
            let label = graph.nodes[idx].label.clone();
            tracing::warn!(%label, attempts, crossings, "placement attempts exhausted");
            self.warnings.push(Warning::PlacementExhausted {
                label,
                attempts,
                crossings,
            });
        }

        let node = &mut graph.nodes[idx];
        node.level = Some(level);
        node.pos = pos;
        node.vel = Vec2::zeros();
        node.initial_sign = Vec2::new(sign(pos.x), sign(pos.y));
        tracing::trace!(label = %node.label, level = ?node.level, x = pos.x, y = pos.y, "placed");
    }
}

/// `1.0` for `+0.0` and positive values, `-1.0` for `-0.0` and negative values.
pub(crate) fn sign(v: f64) -> f64 {
    1.0_f64.copysign(v)
}
