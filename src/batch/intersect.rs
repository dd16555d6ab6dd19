//! Parcel vs hazard screening
//!
//! The bounding-box prefilter rules out most pairs before the backend's
//! precise intersection test runs.

use crate::backend::{BackendError, GeometryBackend};
use crate::geometry::{bounding_boxes_overlap, Polygon};
use crate::parcel::LandParcel;

#[derive(Debug, Clone, PartialEq)]
pub struct AffectedParcel {
    pub parcel_id: i64,
    pub owner: String,
    /// Index of the first hazard polygon found to intersect the parcel
    pub hazard_index: usize,
}

/// Parcels that intersect at least one hazard polygon, in parcel order
pub fn affected_parcels(
    parcels: &[LandParcel],
    hazards: &[Polygon],
    backend: &dyn GeometryBackend,
) -> Result<Vec<AffectedParcel>, BackendError> {
    let mut affected = Vec::new();
    let mut precise_tests = 0usize;

    for parcel in parcels {
        let Some(parcel_ring) = parcel.polygon.exterior() else {
            continue;
        };
        for (hazard_index, hazard) in hazards.iter().enumerate() {
            let Some(hazard_ring) = hazard.exterior() else {
                continue;
            };
            if !bounding_boxes_overlap(parcel_ring, std::slice::from_ref(hazard_ring)) {
                continue;
            }
            precise_tests += 1;
            if backend.polygons_intersect(&parcel.polygon, hazard)? {
                tracing::info!(
                    parcel_id = parcel.id,
                    owner = %parcel.owner,
                    hazard_index,
                    "parcel intersects hazard area"
                );
                affected.push(AffectedParcel {
                    parcel_id: parcel.id,
                    owner: parcel.owner.clone(),
                    hazard_index,
                });
                break;
            }
        }
    }

    tracing::debug!(
        pairs = parcels.len() * hazards.len(),
        precise_tests,
        "hazard screening done"
    );
    Ok(affected)
}
