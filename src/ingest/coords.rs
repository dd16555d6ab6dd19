//! `[[x1, y1], [x2, y2], ...]` coordinate arrays

use super::IngestError;
use crate::geometry::{Point, Ring};

/// Builds points from GeoJSON-style positions, ignoring anything past y
pub(super) fn positions_to_ring(positions: &[Vec<f64>]) -> Result<Ring, IngestError> {
    positions
        .iter()
        .enumerate()
        .map(|(index, pos)| match pos.as_slice() {
            [x, y, ..] => Ok(Point::new(*x, *y)),
            _ => Err(IngestError::ShortPosition {
                index,
                len: pos.len(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Ring::new)
}

/// Parses the parcel polygon column format
pub fn parse_coordinate_array(text: &str) -> Result<Ring, IngestError> {
    let positions: Vec<Vec<f64>> = serde_json::from_str(text)?;
    positions_to_ring(&positions)
}

/// Inverse of [`parse_coordinate_array`]
pub fn ring_to_coordinate_array(ring: &Ring) -> String {
    let positions: Vec<[f64; 2]> = ring.points().iter().map(|p| [p.x, p.y]).collect();
    serde_json::json!(positions).to_string()
}
