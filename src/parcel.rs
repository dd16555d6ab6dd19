//! Land parcels

use crate::geometry::Polygon;

#[derive(Debug, Clone, PartialEq)]
pub struct LandParcel {
    pub id: i64,
    pub owner: String,
    pub polygon: Polygon,
}
