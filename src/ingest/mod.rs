//! Geometry sources: GeoJSON vector datasets and the JSON coordinate-array
//! column used for land parcels

mod coords;
mod geojson;

pub use coords::{parse_coordinate_array, ring_to_coordinate_array};
pub use geojson::{
    load_features, load_polygons, parse_features, parse_polygons, to_feature_collection,
    FeaturePolygon,
};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A coordinate position with fewer than two numbers
    #[error("Position {index} has {len} values, expected at least 2")]
    ShortPosition { index: usize, len: usize },
}
