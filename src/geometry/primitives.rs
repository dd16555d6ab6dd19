//! Pure numeric primitives shared by the validator and the prefilter

use super::types::{Point, Ring};

/// Default tolerance for point equality and collinearity
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Shoelace area of a ring, halved.
///
/// Negative means clockwise, positive counter-clockwise (y axis up). The
/// ring is treated as closed by its last point, so an unclosed ring gets the
/// area of the open polyline's vertex sequence without the wrap-around term.
pub fn signed_area(ring: &Ring) -> f64 {
    let sum: f64 = ring
        .segments()
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum();
    sum / 2.0
}

#[inline]
pub fn points_equal(p: &Point, q: &Point, eps: f64) -> bool {
    (p.x - q.x).abs() <= eps && (p.y - q.y).abs() <= eps
}

/// Cross product of (p2 - p1) and (p3 - p1) within `eps` of zero
#[inline]
pub fn are_collinear(p1: &Point, p2: &Point, p3: &Point, eps: f64) -> bool {
    let cross = (p2.x - p1.x) * (p3.y - p1.y) - (p2.y - p1.y) * (p3.x - p1.x);
    cross.abs() <= eps
}
