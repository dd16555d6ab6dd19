//! Single-ring checks: structure, degeneracy and orientation

use super::outcome::{RingRole, ValidationFailure};
use crate::geometry::{are_collinear, points_equal, Point, Ring, Winding};

pub(super) fn has_minimum_points(ring: &Ring, role: RingRole) -> Result<(), ValidationFailure> {
    // 3 distinct vertices plus the repeated closing point
    if ring.len() < 4 {
        return Err(ValidationFailure::TooFewPoints {
            ring: role,
            count: ring.len(),
        });
    }
    Ok(())
}

pub(super) fn is_closed(ring: &Ring, role: RingRole, eps: f64) -> Result<(), ValidationFailure> {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if points_equal(first, last, eps) => Ok(()),
        _ => Err(ValidationFailure::NotClosed { ring: role }),
    }
}

pub(super) fn coords_are_finite(ring: &Ring, role: RingRole) -> Result<(), ValidationFailure> {
    match ring.points().iter().position(|p| !p.is_finite()) {
        Some(index) => Err(ValidationFailure::NonFiniteCoordinate { ring: role, index }),
        None => Ok(()),
    }
}

/// At least three vertices that differ by more than `eps`, not counting the
/// closing point.
pub(super) fn has_minimum_distinct_vertices(
    ring: &Ring,
    role: RingRole,
    eps: f64,
) -> Result<(), ValidationFailure> {
    let open = &ring.points()[..ring.len().saturating_sub(1)];
    let mut distinct: Vec<Point> = Vec::with_capacity(3);
    for p in open {
        if !distinct.iter().any(|d| points_equal(d, p, eps)) {
            distinct.push(*p);
            if distinct.len() == 3 {
                return Ok(());
            }
        }
    }
    Err(ValidationFailure::TooFewDistinctVertices {
        ring: role,
        distinct: distinct.len(),
    })
}

pub(super) fn has_no_consecutive_duplicates(
    ring: &Ring,
    role: RingRole,
    eps: f64,
) -> Result<(), ValidationFailure> {
    match ring
        .points()
        .windows(2)
        .position(|w| points_equal(&w[0], &w[1], eps))
    {
        Some(i) => Err(ValidationFailure::ConsecutiveDuplicate {
            ring: role,
            index: i + 1,
        }),
        None => Ok(()),
    }
}

/// Fails when every vertex lies within `eps` of the line through the first
/// vertex and the vertex farthest from it
pub(super) fn is_not_collinear(ring: &Ring, role: RingRole, eps: f64) -> Result<(), ValidationFailure> {
    let points = ring.points();
    let collinear = match points.first() {
        None => true,
        Some(anchor) => {
            let farthest = points
                .iter()
                .map(|p| (p, (p.x - anchor.x).hypot(p.y - anchor.y)))
                .max_by(|a, b| a.1.total_cmp(&b.1));
            match farthest {
                Some((far, length)) if !points_equal(anchor, far, eps) => {
                    // Cross product over the baseline length is the distance to the line
                    points
                        .iter()
                        .all(|p| are_collinear(anchor, far, p, eps * length))
                }
                _ => true,
            }
        }
    };
    if collinear {
        return Err(ValidationFailure::Collinear { ring: role });
    }
    Ok(())
}

/// Rings with no measurable area have no winding and pass here; the
/// collinearity check or the oracle decides them.
pub(super) fn has_winding(
    ring: &Ring,
    role: RingRole,
    expected: Winding,
    eps: f64,
) -> Result<(), ValidationFailure> {
    match ring.winding(eps) {
        Some(actual) if actual != expected => Err(ValidationFailure::WrongWinding {
            ring: role,
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}
