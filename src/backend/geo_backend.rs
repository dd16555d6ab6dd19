//! [`GeometryBackend`] on top of the `geo` crate

use std::panic::{catch_unwind, UnwindSafe};

use geo::coordinate_position::CoordPos;
use geo::dimensions::Dimensions;
use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Contains, Intersects, Relate};
use geo_types::{Coord, Line, LineString};

use super::{BackendError, GeometryBackend, IntersectionDimension};
use crate::geometry::{points_equal, Point, Polygon, Ring, DEFAULT_EPSILON};

#[derive(Debug, Clone, Copy)]
pub struct GeoBackend {
    /// Segments shorter than this are dropped before the validity oracle
    /// runs
    epsilon: f64,
}

impl GeoBackend {
    pub fn new() -> Self {
        Self::with_epsilon(DEFAULT_EPSILON)
    }

    pub fn with_epsilon(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for GeoBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn to_coord(p: &Point) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn to_line_string(ring: &Ring) -> LineString<f64> {
    ring.points().iter().map(to_coord).collect()
}

/// Area enclosed by a single ring
fn ring_area(ring: &Ring) -> geo::Polygon<f64> {
    geo::Polygon::new(to_line_string(ring), vec![])
}

fn to_geo_polygon(polygon: &Polygon) -> Option<geo::Polygon<f64>> {
    let exterior = polygon.exterior()?;
    Some(geo::Polygon::new(
        to_line_string(exterior),
        polygon.interiors().iter().map(to_line_string).collect(),
    ))
}

/// Runs a `geo` predicate, turning a panic inside the algorithm into a
/// [`BackendError`].
fn guarded<T>(operation: &'static str, f: impl FnOnce() -> T + UnwindSafe) -> Result<T, BackendError> {
    catch_unwind(f).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::warn!(operation, %message, "geometry backend panicked");
        BackendError::Internal { operation, message }
    })
}

/// Segments of a ring whose endpoints differ by more than `eps`
fn ring_lines(ring: &Ring, eps: f64) -> Vec<Line<f64>> {
    ring.segments()
        .filter(|(p, q)| !points_equal(p, q, eps))
        .map(|(p, q)| Line::new(to_coord(&p), to_coord(&q)))
        .collect()
}

/// No segment crosses, touches or doubles back over another one, apart from
/// neighbours meeting at their shared vertex.
fn ring_is_simple(lines: &[Line<f64>]) -> bool {
    let n = lines.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            match line_intersection(lines[i], lines[j]) {
                None => {}
                Some(LineIntersection::Collinear { .. }) => return false,
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(LineIntersection::SinglePoint { .. }) => return false,
            }
        }
    }
    true
}

/// Two rings may touch at isolated points but never cross or share an edge
fn rings_compatible(a: &[Line<f64>], b: &[Line<f64>]) -> bool {
    a.iter().all(|la| {
        b.iter().all(|lb| {
            !matches!(
                line_intersection(*la, *lb),
                Some(LineIntersection::Collinear { .. })
                    | Some(LineIntersection::SinglePoint { is_proper: true, .. })
            )
        })
    })
}

fn polygon_is_valid(polygon: &Polygon, eps: f64) -> bool {
    let Some(exterior) = polygon.exterior() else {
        return false;
    };
    let rings: Vec<&Ring> = std::iter::once(exterior)
        .chain(polygon.interiors().iter())
        .collect();

    if rings
        .iter()
        .any(|r| r.len() < 4 || r.points().iter().any(|p| !p.is_finite()))
    {
        return false;
    }

    let lines: Vec<Vec<Line<f64>>> = rings.iter().map(|r| ring_lines(r, eps)).collect();
    if !lines.iter().all(|l| ring_is_simple(l)) {
        return false;
    }

    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            if !rings_compatible(&lines[i], &lines[j]) {
                return false;
            }
        }
    }
    true
}

fn dimension_of(d: Dimensions) -> IntersectionDimension {
    match d {
        Dimensions::Empty => IntersectionDimension::Empty,
        Dimensions::ZeroDimensional => IntersectionDimension::Point,
        Dimensions::OneDimensional => IntersectionDimension::Line,
        Dimensions::TwoDimensional => IntersectionDimension::Area,
    }
}

impl GeometryBackend for GeoBackend {
    fn contains(&self, outer: &Ring, inner: &Ring) -> Result<bool, BackendError> {
        let outer = ring_area(outer);
        let inner = ring_area(inner);
        guarded("contains", || outer.contains(&inner))
    }

    fn intersection_dimension(
        &self,
        a: &Ring,
        b: &Ring,
    ) -> Result<IntersectionDimension, BackendError> {
        let a = ring_area(a);
        let b = ring_area(b);
        let matrix = guarded("relate", || a.relate(&b))?;

        let cells = [
            (CoordPos::Inside, CoordPos::Inside),
            (CoordPos::Inside, CoordPos::OnBoundary),
            (CoordPos::OnBoundary, CoordPos::Inside),
            (CoordPos::OnBoundary, CoordPos::OnBoundary),
        ];
        Ok(cells
            .iter()
            .map(|&(lhs, rhs)| dimension_of(matrix.get(lhs, rhs)))
            .max()
            .unwrap_or(IntersectionDimension::Empty))
    }

    fn is_topologically_valid(&self, polygon: &Polygon) -> Result<bool, BackendError> {
        let eps = self.epsilon;
        guarded("validity", || polygon_is_valid(polygon, eps))
    }

    fn polygons_intersect(&self, a: &Polygon, b: &Polygon) -> Result<bool, BackendError> {
        let (Some(a), Some(b)) = (to_geo_polygon(a), to_geo_polygon(b)) else {
            return Ok(false);
        };
        guarded("intersects", || a.intersects(&b))
    }
}
