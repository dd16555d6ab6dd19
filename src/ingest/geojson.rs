//! GeoJSON dataset loading
//!
//! Only areal geometries matter here: each Polygon feature yields one
//! polygon, MultiPolygons are flattened in order, everything else is
//! skipped. The position of a polygon in the returned list is its index for
//! reporting and persistence.

use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::coords::positions_to_ring;
use super::IngestError;
use crate::geometry::{Polygon, Ring};

type PolygonCoords = Vec<Vec<Vec<f64>>>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Document {
    FeatureCollection { features: Vec<Feature> },
    Feature(Feature),
    Polygon { coordinates: PolygonCoords },
    MultiPolygon { coordinates: Vec<PolygonCoords> },
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    geometry: Option<Geometry>,
}

/// A polygon together with the properties of the feature it came from.
/// MultiPolygon members share their feature's properties.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePolygon {
    pub properties: Map<String, Value>,
    pub polygon: Polygon,
}

impl FeaturePolygon {
    /// String property, if present
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: PolygonCoords,
    },
    MultiPolygon {
        coordinates: Vec<PolygonCoords>,
    },
    #[serde(other)]
    Other,
}

fn build_polygon(rings: &PolygonCoords) -> Result<Polygon, IngestError> {
    let Some((exterior, holes)) = rings.split_first() else {
        return Ok(Polygon::empty());
    };
    let holes = holes
        .iter()
        .map(|h| positions_to_ring(h))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(positions_to_ring(exterior)?, holes))
}

fn collect_geometry(
    geometry: &Geometry,
    properties: &Map<String, Value>,
    out: &mut Vec<FeaturePolygon>,
) -> Result<(), IngestError> {
    let members: &[PolygonCoords] = match geometry {
        Geometry::Polygon { coordinates } => std::slice::from_ref(coordinates),
        Geometry::MultiPolygon { coordinates } => coordinates,
        Geometry::Other => &[],
    };
    for member in members {
        out.push(FeaturePolygon {
            properties: properties.clone(),
            polygon: build_polygon(member)?,
        });
    }
    Ok(())
}

fn collect_feature(feature: &Feature, out: &mut Vec<FeaturePolygon>) -> Result<bool, IngestError> {
    let Some(geometry) = &feature.geometry else {
        return Ok(false);
    };
    let properties = feature.properties.clone().unwrap_or_default();
    collect_geometry(geometry, &properties, out)?;
    Ok(true)
}

/// Polygons and their feature properties from a GeoJSON document, in
/// source order
pub fn parse_features(json: &str) -> Result<Vec<FeaturePolygon>, IngestError> {
    let document: Document = serde_json::from_str(json)?;
    let mut out = Vec::new();
    let no_properties = Map::new();
    match document {
        Document::FeatureCollection { features } => {
            let mut skipped = 0usize;
            for feature in &features {
                if !collect_feature(feature, &mut out)? {
                    skipped += 1;
                }
            }
            if skipped > 0 {
                tracing::debug!(skipped, "features without geometry ignored");
            }
        }
        Document::Feature(feature) => {
            collect_feature(&feature, &mut out)?;
        }
        Document::Polygon { coordinates } => {
            collect_geometry(&Geometry::Polygon { coordinates }, &no_properties, &mut out)?
        }
        Document::MultiPolygon { coordinates } => {
            collect_geometry(&Geometry::MultiPolygon { coordinates }, &no_properties, &mut out)?
        }
    }
    Ok(out)
}

/// Polygons from a GeoJSON document, in source order
pub fn parse_polygons(json: &str) -> Result<Vec<Polygon>, IngestError> {
    Ok(parse_features(json)?.into_iter().map(|f| f.polygon).collect())
}

fn read(path: &Path) -> Result<String, IngestError> {
    std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_features(path: &Path) -> Result<Vec<FeaturePolygon>, IngestError> {
    let features = parse_features(&read(path)?)?;
    tracing::info!(path = %path.display(), count = features.len(), "loaded polygons");
    Ok(features)
}

pub fn load_polygons(path: &Path) -> Result<Vec<Polygon>, IngestError> {
    Ok(load_features(path)?.into_iter().map(|f| f.polygon).collect())
}

fn ring_coords(ring: &Ring) -> Value {
    ring.points().iter().map(|p| json!([p.x, p.y])).collect()
}

/// FeatureCollection with one Polygon feature per entry, named by a `name`
/// property
pub fn to_feature_collection<'a>(polygons: impl IntoIterator<Item = (&'a str, &'a Polygon)>) -> Value {
    let features: Vec<Value> = polygons
        .into_iter()
        .map(|(name, polygon)| {
            let rings: Vec<Value> = polygon
                .exterior()
                .into_iter()
                .chain(polygon.interiors())
                .map(ring_coords)
                .collect();
            json!({
                "type": "Feature",
                "properties": { "name": name },
                "geometry": { "type": "Polygon", "coordinates": rings },
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}
