//! Orientation and segment-intersection predicates.
//!
//! The orientation test classifies the turn `p -> q -> r` from the sign of the cross product
//! `(q - p) x (r - q)`. Values within a tolerance of zero count as collinear; pass `0.0` for the
//! exact-zero classification.

use crate::config::ORIENTATION_EPSILON;
use nalgebra::Vector2;

pub type Vec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    orientation_with_tolerance(p, q, r, ORIENTATION_EPSILON)
}

pub fn orientation_with_tolerance(p: Vec2, q: Vec2, r: Vec2, eps: f64) -> Orientation {
    let cross = (q.x - p.x) * (r.y - q.y) - (q.y - p.y) * (r.x - q.x);
    if cross.abs() <= eps {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    segments_intersect_with_tolerance(p1, q1, p2, q2, ORIENTATION_EPSILON)
}

/// General-position crossing test. Segments sharing an endpoint never cross; collinear overlap is
/// not special-cased.
pub fn segments_intersect_with_tolerance(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2, eps: f64) -> bool {
    if p1 == p2 || p1 == q2 || q1 == p2 || q1 == q2 {
        return false;
    }

    let o1 = orientation_with_tolerance(p1, q1, p2, eps);
    let o2 = orientation_with_tolerance(p1, q1, q2, eps);
    let o3 = orientation_with_tolerance(p2, q2, p1, eps);
    let o4 = orientation_with_tolerance(p2, q2, q1, eps);

    o1 != o2 && o3 != o4
}

/// Number of unordered segment pairs that cross.
pub fn count_crossings(segments: &[(Vec2, Vec2)], eps: f64) -> usize {
    let mut crossings = 0;
    for (i, &(a1, b1)) in segments.iter().enumerate() {
        for &(a2, b2) in &segments[i + 1..] {
            if segments_intersect_with_tolerance(a1, b1, a2, b2, eps) {
                crossings += 1;
            }
        }
    }
    crossings
}
