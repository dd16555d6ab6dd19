//! Checks on the relationship between rings: hole overlap, containment and
//! boundary contact, and the final oracle pass.

use super::outcome::ValidationFailure;
use crate::backend::{GeometryBackend, IntersectionDimension};
use crate::core::BoundaryTouchCheck;
use crate::geometry::{are_collinear, Point, Polygon, Ring};

/// No two holes share area. Touching at a point or along an edge passes.
pub(super) fn holes_do_not_overlap(
    backend: &dyn GeometryBackend,
    holes: &[Ring],
) -> Result<(), ValidationFailure> {
    for_each_hole_pair(holes, |first, second| {
        if backend.intersection_dimension(&holes[first], &holes[second])?
            == IntersectionDimension::Area
        {
            return Err(ValidationFailure::HolesOverlap { first, second });
        }
        Ok(())
    })
}

/// No two holes share any point at all
pub(super) fn holes_do_not_intersect(
    backend: &dyn GeometryBackend,
    holes: &[Ring],
) -> Result<(), ValidationFailure> {
    for_each_hole_pair(holes, |first, second| {
        if !backend
            .intersection_dimension(&holes[first], &holes[second])?
            .is_empty()
        {
            return Err(ValidationFailure::HolesIntersect { first, second });
        }
        Ok(())
    })
}

pub(super) fn holes_are_contained(
    backend: &dyn GeometryBackend,
    exterior: &Ring,
    holes: &[Ring],
) -> Result<(), ValidationFailure> {
    for (hole, ring) in holes.iter().enumerate() {
        if !backend.contains(exterior, ring)? {
            return Err(ValidationFailure::HoleNotContained { hole });
        }
    }
    Ok(())
}

pub(super) fn holes_do_not_touch_exterior(
    exterior: &Ring,
    holes: &[Ring],
    mode: BoundaryTouchCheck,
    eps: f64,
) -> Result<(), ValidationFailure> {
    for (hole, ring) in holes.iter().enumerate() {
        let touches = match mode {
            BoundaryTouchCheck::Segment => rings_touch(exterior, ring, eps),
            BoundaryTouchCheck::Vertex => vertex_on_hole_line(exterior, ring, eps),
        };
        if touches {
            return Err(ValidationFailure::HoleTouchesExterior { hole });
        }
    }
    Ok(())
}

pub(super) fn oracle_accepts(
    backend: &dyn GeometryBackend,
    polygon: &Polygon,
) -> Result<(), ValidationFailure> {
    if !backend.is_topologically_valid(polygon)? {
        return Err(ValidationFailure::TopologyRejected);
    }
    Ok(())
}

fn for_each_hole_pair(
    holes: &[Ring],
    mut check: impl FnMut(usize, usize) -> Result<(), ValidationFailure>,
) -> Result<(), ValidationFailure> {
    for first in 0..holes.len() {
        for second in (first + 1)..holes.len() {
            check(first, second)?;
        }
    }
    Ok(())
}

/// Legacy check: some exterior vertex lies on the supporting line of a hole
/// segment.
fn vertex_on_hole_line(exterior: &Ring, hole: &Ring, eps: f64) -> bool {
    let vertices = &exterior.points()[..exterior.len().saturating_sub(1)];
    vertices.iter().any(|v| {
        hole.segments()
            .any(|(a, b)| are_collinear(&a, &b, v, eps))
    })
}

/// Some exterior segment comes within `eps` of some hole segment
fn rings_touch(exterior: &Ring, hole: &Ring, eps: f64) -> bool {
    exterior.segments().any(|(a1, a2)| {
        hole.segments()
            .any(|(b1, b2)| segments_touch(a1, a2, b1, b2, eps))
    })
}

fn segments_touch(a1: Point, a2: Point, b1: Point, b2: Point, eps: f64) -> bool {
    if segments_cross(a1, a2, b1, b2) {
        return true;
    }
    point_segment_distance(a1, b1, b2) <= eps
        || point_segment_distance(a2, b1, b2) <= eps
        || point_segment_distance(b1, a1, a2) <= eps
        || point_segment_distance(b2, a1, a2) <= eps
}

/// Proper crossing: each segment's endpoints lie strictly on opposite sides
/// of the other.
fn segments_cross(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}
