//! The ordered rule pipeline

use super::outcome::{RingRole, ValidationFailure, ValidationOutcome};
use super::{ring, topology};
use crate::backend::{GeoBackend, GeometryBackend};
use crate::core::{HoleOverlapCheck, ValidatorConfig};
use crate::geometry::{Polygon, Ring};

/// Decides whether a polygon is topologically well-formed.
///
/// Rules, in order (the first failure is reported):
///
/// 1. exterior ring exists
/// 2. exterior has at least 4 points
/// 3. exterior is closed
/// 4. exterior coordinates are finite
/// 5. exterior has at least 3 distinct vertices
/// 6. exterior has no consecutive duplicate points
/// 7. exterior is not collinear
/// 8. exterior winds the configured way
/// 9. each hole: minimum points, closed, finite, opposite winding, not collinear
/// 10. no two holes overlap by area
/// 11. every hole lies inside the exterior
/// 12. no hole touches the exterior boundary
/// 13. no two holes intersect at all
/// 14. the backend's validity oracle accepts the polygon
///
/// Validation is read-only and holds no state between calls, so one
/// validator can be shared across threads.
#[derive(Debug, Clone)]
pub struct TopologyValidator<B = GeoBackend> {
    config: ValidatorConfig,
    backend: B,
}

impl TopologyValidator<GeoBackend> {
    pub fn new(config: ValidatorConfig) -> Self {
        let backend = GeoBackend::with_epsilon(config.epsilon);
        Self::with_backend(config, backend)
    }
}

impl Default for TopologyValidator<GeoBackend> {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl<B: GeometryBackend> TopologyValidator<B> {
    pub fn with_backend(config: ValidatorConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn validate(&self, polygon: &Polygon) -> ValidationOutcome {
        let outcome = ValidationOutcome::from(self.check(polygon));
        if let Some(failure) = outcome.failure() {
            tracing::debug!(category = ?failure.category(), reason = %failure, "polygon rejected");
        }
        outcome
    }

    fn check(&self, polygon: &Polygon) -> Result<(), ValidationFailure> {
        let eps = self.config.epsilon;

        let exterior = polygon.exterior().ok_or(ValidationFailure::MissingExterior)?;
        let role = RingRole::Exterior;
        ring::has_minimum_points(exterior, role)?;
        ring::is_closed(exterior, role, eps)?;
        ring::coords_are_finite(exterior, role)?;
        ring::has_minimum_distinct_vertices(exterior, role, eps)?;
        ring::has_no_consecutive_duplicates(exterior, role, eps)?;
        ring::is_not_collinear(exterior, role, eps)?;
        ring::has_winding(exterior, role, self.config.exterior_winding, eps)?;

        let holes = polygon.interiors();
        for (i, hole) in holes.iter().enumerate() {
            self.check_hole(hole, RingRole::Interior(i))?;
        }

        let backend: &dyn GeometryBackend = &self.backend;
        topology::holes_do_not_overlap(backend, holes)?;
        topology::holes_are_contained(backend, exterior, holes)?;
        topology::holes_do_not_touch_exterior(exterior, holes, self.config.boundary_touch, eps)?;
        if self.config.hole_overlap == HoleOverlapCheck::AreaThenAny {
            topology::holes_do_not_intersect(backend, holes)?;
        }
        topology::oracle_accepts(backend, polygon)
    }

    fn check_hole(&self, hole: &Ring, role: RingRole) -> Result<(), ValidationFailure> {
        let eps = self.config.epsilon;
        ring::has_minimum_points(hole, role)?;
        ring::is_closed(hole, role, eps)?;
        ring::coords_are_finite(hole, role)?;
        ring::has_winding(hole, role, self.config.hole_winding(), eps)?;
        ring::is_not_collinear(hole, role, eps)
    }
}
