//! Geometry backend: the containment, intersection and validity predicates
//! the topology validator consumes but does not implement itself.

mod geo_backend;

pub use geo_backend::GeoBackend;

use thiserror::Error;

use crate::geometry::{Polygon, Ring};

/// Internal failure inside a backend predicate. Never a verdict on the
/// geometry itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("{operation} failed: {message}")]
    Internal {
        operation: &'static str,
        message: String,
    },
}

/// Highest dimension of the intersection of two areal geometries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntersectionDimension {
    Empty,
    Point,
    Line,
    Area,
}

impl IntersectionDimension {
    pub fn is_empty(self) -> bool {
        self == IntersectionDimension::Empty
    }
}

pub trait GeometryBackend: Send + Sync {
    /// True when the area enclosed by `inner` lies entirely within the area
    /// enclosed by `outer`. Shared boundary does not break containment.
    fn contains(&self, outer: &Ring, inner: &Ring) -> Result<bool, BackendError>;

    /// Dimension of the intersection of the areas enclosed by two rings
    fn intersection_dimension(
        &self,
        a: &Ring,
        b: &Ring,
    ) -> Result<IntersectionDimension, BackendError>;

    /// Canonical validity oracle for a whole polygon
    fn is_topologically_valid(&self, polygon: &Polygon) -> Result<bool, BackendError>;

    /// Whether two polygons (holes included) share any point
    fn polygons_intersect(&self, a: &Polygon, b: &Polygon) -> Result<bool, BackendError>;
}
