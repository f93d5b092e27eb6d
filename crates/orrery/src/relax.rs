//! Ring-constrained force relaxation.
//!
//! Each non-root node lives on the circle of radius `level * ring_unit` around the root. Forces
//! are projected onto the ring tangent, integrated with a fixed time step and damped every step.
//! A step never carries a node further than `max_displacement`. After moving, a coordinate that
//! crossed its axis is pinned onto that axis, the node is stopped, and it is rescaled onto its
//! ring. The root never moves.

use crate::config::{LayoutConfig, UpdateOrder};
use crate::geom::Vec2;
use crate::graph::Graph;
use crate::placement::sign;

/// Terminal state of a relaxation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelaxationOutcome {
    Steady,
    IterationCapReached,
}

/// Advances every movable node by one time step.
///
/// Returns the `(lower, higher)` index pairs of nodes that coincided exactly while computing
/// repulsion.
pub fn step(graph: &mut Graph, cfg: &LayoutConfig) -> Vec<(usize, usize)> {
    let snapshot: Option<Vec<Vec2>> = match cfg.update_order {
        UpdateOrder::Sequential => None,
        UpdateOrder::Snapshot => Some(graph.nodes.iter().map(|n| n.pos).collect()),
    };
    let movable: Vec<usize> = graph.movable().collect();

    let mut coincident: Vec<(usize, usize)> = Vec::new();
    for n in movable {
        let node = &graph.nodes[n];
        let radius = node.ring_radius(cfg.ring_unit);
        let pos = node.pos;
        let initial_sign = node.initial_sign;
        let tangent = tangent_at(pos, radius);

        let mut force = Vec2::zeros();
        for (m, other) in graph.nodes.iter().enumerate() {
            if m == n || !other.is_placed() {
                continue;
            }
            let other_pos = match &snapshot {
                Some(s) => s[m],
                None => other.pos,
            };
            let d = pos - other_pos;
            if graph.attracts(n, m) {
                force += d * -cfg.k_attr;
            }
            force += repulsion(d, tangent, n > m, cfg, || coincident.push((n.min(m), n.max(m))));
        }
        force.y += cfg.k_vert * sign(pos.y);

        let f_proj = tangent * tangent.dot(&force);
        let mut vel = (graph.nodes[n].vel + f_proj * cfg.dt) * cfg.damping;
        let travel = vel.norm() * cfg.dt;
        if travel > cfg.max_displacement {
            vel *= cfg.max_displacement / travel;
        }
        let mut next = pos + vel * cfg.dt;

        // Signed zero keeps the node on its own side of the axis it hit.
        let mut clamped = false;
        if sign(next.y) != initial_sign.y {
            next.y = 0.0_f64.copysign(initial_sign.y);
            clamped = true;
        }
        if sign(next.x) != initial_sign.x {
            next.x = 0.0_f64.copysign(initial_sign.x);
            clamped = true;
        }
        if clamped {
            vel = Vec2::zeros();
        }

        let r = next.norm();
        if r > 0.0 {
            next *= radius / r;
        } else {
            next = Vec2::new(0.0 * initial_sign.x, radius * initial_sign.y);
        }

        let t = tangent_at(next, radius);
        let node = &mut graph.nodes[n];
        node.pos = next;
        node.vel = t * t.dot(&vel);
    }

    coincident
}

/// True when every movable node's squared speed is at or below `threshold`.
pub fn is_steady(graph: &Graph, threshold: f64) -> bool {
    graph
        .movable()
        .all(|idx| graph.nodes[idx].vel.norm_squared() <= threshold)
}

/// Largest squared speed among movable nodes, `0.0` if there are none.
pub fn max_velocity_sq(graph: &Graph) -> f64 {
    graph
        .movable()
        .map(|idx| graph.nodes[idx].vel.norm_squared())
        .fold(0.0, f64::max)
}

fn tangent_at(pos: Vec2, radius: f64) -> Vec2 {
    Vec2::new(-pos.y / radius, pos.x / radius)
}

/// Inverse-cube push of `d = n - m`, capped below `min_distance`. Exactly coincident nodes are
/// pushed apart along the tangent, the higher arena index forward.
fn repulsion(
    d: Vec2,
    tangent: Vec2,
    forward: bool,
    cfg: &LayoutConfig,
    on_coincident: impl FnOnce(),
) -> Vec2 {
    let dist = d.norm();
    if dist >= cfg.min_distance {
        return d * (cfg.k_rep / (dist * dist * dist));
    }
    let dir = if dist > 0.0 {
        d / dist
    } else {
        on_coincident();
        if forward { tangent } else { -tangent }
    };
    dir * (cfg.k_rep / (cfg.min_distance * cfg.min_distance))
}
