//! Geometry model: points, rings, polygons and the numeric primitives over them

mod bbox;
mod primitives;
mod types;

pub use bbox::{bounding_boxes_overlap, BoundingBox};
pub use primitives::{are_collinear, points_equal, signed_area, DEFAULT_EPSILON};
pub use types::{Point, Polygon, Ring, Winding};
