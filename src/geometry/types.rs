//! Immutable geometry value types

use serde::{Deserialize, Serialize};

use super::primitives::signed_area;

/// A 2D coordinate.
///
/// The derived `PartialEq` compares exactly and is only meant for tests
/// and round-trips; geometric checks use [`super::points_equal`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Vertex traversal direction of a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    pub fn opposite(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
        }
    }

    /// Winding implied by a signed area. Areas within `eps` of zero have no
    /// winding.
    pub fn from_signed_area(area: f64, eps: f64) -> Option<Self> {
        if area > eps {
            Some(Winding::CounterClockwise)
        } else if area < -eps {
            Some(Winding::Clockwise)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Winding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winding::Clockwise => write!(f, "clockwise"),
            Winding::CounterClockwise => write!(f, "counter-clockwise"),
        }
    }
}

/// Ordered sequence of points bounding one contour.
///
/// Construction does not check anything: closure, minimum length and
/// finiteness are the validator's job, so malformed input can still be
/// represented and diagnosed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Consecutive vertex pairs, including the pair that ends on the
    /// closing point.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn signed_area(&self) -> f64 {
        signed_area(self)
    }

    /// `eps` is a length tolerance, so areas within `eps²` of zero have no
    /// winding.
    pub fn winding(&self, eps: f64) -> Option<Winding> {
        Winding::from_signed_area(self.signed_area(), eps * eps)
    }

    /// Same ring traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }
}

impl<P: Into<Point>> FromIterator<P> for Ring {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// One exterior ring plus zero or more holes.
///
/// `exterior` is optional so that a source polygon with no rings at all can
/// be carried through to the validator and reported as malformed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    exterior: Option<Ring>,
    interiors: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior: Some(exterior),
            interiors,
        }
    }

    /// Polygon with no exterior ring
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn exterior(&self) -> Option<&Ring> {
        self.exterior.as_ref()
    }

    pub fn interiors(&self) -> &[Ring] {
        &self.interiors
    }
}
