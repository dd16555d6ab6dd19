//! Rule-ordering and reason tests for the topology validator

use parcel_hazard::backend::{BackendError, GeoBackend, GeometryBackend, IntersectionDimension};
use parcel_hazard::batch::{persist_outcomes, validate_batch, BatchSummary};
use parcel_hazard::core::{BoundaryTouchCheck, HoleOverlapCheck, ValidatorConfig};
use parcel_hazard::fixtures::reference_cases;
use parcel_hazard::geometry::{signed_area, Point, Polygon, Ring, Winding};
use parcel_hazard::store::{MemoryStore, ValidityStore};
use parcel_hazard::validation::{FailureCategory, RingRole, TopologyValidator, ValidationFailure};

fn ring(points: &[(f64, f64)]) -> Ring {
    points.iter().copied().collect()
}

fn square10() -> Ring {
    ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)])
}

fn failure_of(validator: &TopologyValidator, polygon: &Polygon) -> Option<ValidationFailure> {
    validator.validate(polygon).failure().cloned()
}

#[test]
fn test_rectangle_matches_configured_winding() {
    let validator = TopologyValidator::default();
    let rect = square10();
    assert!(signed_area(&rect) < 0.0);
    assert!(validator.validate(&Polygon::new(rect.clone(), vec![])).is_valid());

    let reversed = rect.reversed();
    assert_eq!(signed_area(&reversed), -signed_area(&rect));
    assert_eq!(
        failure_of(&validator, &Polygon::new(reversed.clone(), vec![])),
        Some(ValidationFailure::WrongWinding {
            ring: RingRole::Exterior,
            expected: Winding::Clockwise,
            actual: Winding::CounterClockwise,
        })
    );

    let ccw = TopologyValidator::new(ValidatorConfig {
        exterior_winding: Winding::CounterClockwise,
        ..ValidatorConfig::default()
    });
    assert!(ccw.validate(&Polygon::new(reversed, vec![])).is_valid());
    assert!(!ccw.validate(&Polygon::new(rect, vec![])).is_valid());
}

#[test]
fn test_earliest_rule_is_reported() {
    let validator = TopologyValidator::default();

    // Too short and counter-clockwise: the point count wins
    let short = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    assert_eq!(
        failure_of(&validator, &Polygon::new(short, vec![])),
        Some(ValidationFailure::TooFewPoints { ring: RingRole::Exterior, count: 3 })
    );

    // Unclosed and counter-clockwise: closure wins over winding
    let open = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 1.0)]);
    assert_eq!(
        failure_of(&validator, &Polygon::new(open, vec![])),
        Some(ValidationFailure::NotClosed { ring: RingRole::Exterior })
    );
}

#[test]
fn test_missing_exterior() {
    let outcome = TopologyValidator::default().validate(&Polygon::empty());
    assert_eq!(outcome.reason().as_deref(), Some("Missing exterior ring"));
    assert_eq!(outcome.failure().unwrap().category(), FailureCategory::Structural);
}

#[test]
fn test_non_finite_coordinate() {
    let r = ring(&[(0.0, 0.0), (0.0, f64::INFINITY), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
    assert_eq!(
        failure_of(&TopologyValidator::default(), &Polygon::new(r, vec![])),
        Some(ValidationFailure::NonFiniteCoordinate { ring: RingRole::Exterior, index: 1 })
    );
}

#[test]
fn test_collinear_ring() {
    let line = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 0.0)]);
    let failure = failure_of(&TopologyValidator::default(), &Polygon::new(line, vec![])).unwrap();
    assert_eq!(failure, ValidationFailure::Collinear { ring: RingRole::Exterior });
    assert_eq!(failure.category(), FailureCategory::Geometric);
}

#[test]
fn test_triangular_hole_inside_is_valid() {
    let hole = ring(&[(2.0, 2.0), (5.0, 3.0), (3.0, 6.0), (2.0, 2.0)]);
    let polygon = Polygon::new(square10(), vec![hole]);
    for boundary_touch in [BoundaryTouchCheck::Segment, BoundaryTouchCheck::Vertex] {
        let validator = TopologyValidator::new(ValidatorConfig {
            boundary_touch,
            ..ValidatorConfig::default()
        });
        assert!(validator.validate(&polygon).is_valid());
    }
}

#[test]
fn test_hole_edge_on_boundary_touches() {
    let hole = ring(&[(2.0, 0.0), (6.0, 0.0), (4.0, 4.0), (2.0, 0.0)]);
    let polygon = Polygon::new(square10(), vec![hole]);
    for boundary_touch in [BoundaryTouchCheck::Segment, BoundaryTouchCheck::Vertex] {
        let validator = TopologyValidator::new(ValidatorConfig {
            boundary_touch,
            ..ValidatorConfig::default()
        });
        assert_eq!(
            failure_of(&validator, &polygon),
            Some(ValidationFailure::HoleTouchesExterior { hole: 0 })
        );
    }
}

#[test]
fn test_oversized_hole_not_contained() {
    let hole = ring(&[(2.0, 2.0), (15.0, 3.0), (3.0, 16.0), (2.0, 2.0)]);
    let polygon = Polygon::new(square10(), vec![hole]);
    let outcome = TopologyValidator::default().validate(&polygon);
    assert_eq!(outcome.failure(), Some(&ValidationFailure::HoleNotContained { hole: 0 }));
    assert_eq!(
        outcome.reason().as_deref(),
        Some("Interior ring 0 is not contained in the exterior ring")
    );
}

#[test]
fn test_overlapping_holes() {
    let a = ring(&[(2.0, 2.0), (6.0, 2.0), (4.0, 6.0), (2.0, 2.0)]);
    let b = ring(&[(3.0, 3.0), (7.0, 3.0), (5.0, 7.0), (3.0, 3.0)]);
    let polygon = Polygon::new(square10(), vec![a, b]);
    let failure = failure_of(&TopologyValidator::default(), &polygon).unwrap();
    assert_eq!(failure, ValidationFailure::HolesOverlap { first: 0, second: 1 });
    assert_eq!(failure.category(), FailureCategory::Topology);
}

#[test]
fn test_holes_touching_at_a_point() {
    let a = ring(&[(2.0, 2.0), (4.0, 2.0), (3.0, 4.0), (2.0, 2.0)]);
    let b = ring(&[(4.0, 2.0), (6.0, 3.0), (5.0, 5.0), (4.0, 2.0)]);
    let polygon = Polygon::new(square10(), vec![a, b]);

    // Not an area overlap, but the any-contact rule catches it
    assert_eq!(
        failure_of(&TopologyValidator::default(), &polygon),
        Some(ValidationFailure::HolesIntersect { first: 0, second: 1 })
    );

    let area_only = TopologyValidator::new(ValidatorConfig {
        hole_overlap: HoleOverlapCheck::AreaOnly,
        ..ValidatorConfig::default()
    });
    assert!(area_only.validate(&polygon).is_valid());
}

#[test]
fn test_hole_winding_must_oppose_exterior() {
    let hole = ring(&[(2.0, 2.0), (3.0, 6.0), (5.0, 3.0), (2.0, 2.0)]);
    assert_eq!(
        failure_of(&TopologyValidator::default(), &Polygon::new(square10(), vec![hole])),
        Some(ValidationFailure::WrongWinding {
            ring: RingRole::Interior(0),
            expected: Winding::CounterClockwise,
            actual: Winding::Clockwise,
        })
    );
}

fn with_hole(hole: Ring) -> Polygon {
    Polygon::new(square10(), vec![hole])
}

#[test]
fn test_hole_ring_checks_run_in_order() {
    let validator = TopologyValidator::default();

    assert_eq!(
        failure_of(&validator, &with_hole(ring(&[(2.0, 2.0), (5.0, 3.0), (2.0, 2.0)]))),
        Some(ValidationFailure::TooFewPoints { ring: RingRole::Interior(0), count: 3 })
    );

    // Unclosed and clockwise: closure is reported, not winding
    assert_eq!(
        failure_of(&validator, &with_hole(ring(&[(2.0, 2.0), (3.0, 6.0), (5.0, 3.0), (2.0, 3.0)]))),
        Some(ValidationFailure::NotClosed { ring: RingRole::Interior(0) })
    );

    assert_eq!(
        failure_of(&validator, &with_hole(ring(&[(2.0, 2.0), (5.0, f64::NAN), (3.0, 6.0), (2.0, 2.0)]))),
        Some(ValidationFailure::NonFiniteCoordinate { ring: RingRole::Interior(0), index: 1 })
    );

    // Zero area has no winding, so the collinearity check reports it
    assert_eq!(
        failure_of(&validator, &with_hole(ring(&[(2.0, 2.0), (3.0, 2.0), (4.0, 2.0), (2.0, 2.0)]))),
        Some(ValidationFailure::Collinear { ring: RingRole::Interior(0) })
    );
}

#[test]
fn test_later_hole_is_named_by_index() {
    let good = ring(&[(2.0, 2.0), (5.0, 3.0), (3.0, 6.0), (2.0, 2.0)]);
    let short = ring(&[(6.0, 6.0), (8.0, 6.0), (6.0, 6.0)]);
    let outcome = TopologyValidator::default().validate(&Polygon::new(square10(), vec![good, short]));
    assert_eq!(
        outcome.failure(),
        Some(&ValidationFailure::TooFewPoints { ring: RingRole::Interior(1), count: 3 })
    );
    assert_eq!(
        outcome.reason().as_deref(),
        Some("Interior ring 1 has fewer than 4 points (3)")
    );
}

#[test]
fn test_small_geographic_parcel() {
    let (x, y, s) = (-120.12, 38.65, 2e-5);
    let parcel = ring(&[(x, y), (x, y + s), (x + s, y + s), (x + s, y), (x, y)]);
    let validator = TopologyValidator::default();

    assert!(validator.validate(&Polygon::new(parcel.clone(), vec![])).is_valid());
    assert!(matches!(
        failure_of(&validator, &Polygon::new(parcel.reversed(), vec![])),
        Some(ValidationFailure::WrongWinding { ring: RingRole::Exterior, .. })
    ));
}

#[test]
fn test_self_intersection_left_to_oracle() {
    let bowtie = ring(&[(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
    assert_eq!(
        failure_of(&TopologyValidator::default(), &Polygon::new(bowtie, vec![])),
        Some(ValidationFailure::TopologyRejected)
    );
}

#[test]
fn test_epsilon_is_configurable() {
    let r = ring(&[
        (0.0, 0.0),
        (0.0, 10.0),
        (10.0, 10.0),
        (10.0, 1e-7),
        (10.0, 0.0),
        (0.0, 0.0),
    ]);
    let polygon = Polygon::new(r, vec![]);
    assert!(TopologyValidator::default().validate(&polygon).is_valid());

    let coarse = TopologyValidator::new(ValidatorConfig {
        epsilon: 1e-6,
        ..ValidatorConfig::default()
    });
    assert_eq!(
        failure_of(&coarse, &polygon),
        Some(ValidationFailure::ConsecutiveDuplicate { ring: RingRole::Exterior, index: 4 })
    );
}

#[test]
fn test_reference_cases() {
    let validator = TopologyValidator::default();
    let expected: Vec<(&str, Option<ValidationFailure>)> = vec![
        ("SelfIntersecting", Some(ValidationFailure::TopologyRejected)),
        (
            "DuplicatePoints",
            Some(ValidationFailure::ConsecutiveDuplicate { ring: RingRole::Exterior, index: 3 }),
        ),
        (
            "LessThanThree",
            Some(ValidationFailure::TooFewPoints { ring: RingRole::Exterior, count: 3 }),
        ),
        (
            "ReversedWinding",
            Some(ValidationFailure::WrongWinding {
                ring: RingRole::Exterior,
                expected: Winding::Clockwise,
                actual: Winding::CounterClockwise,
            }),
        ),
        ("DisconnectedRings", Some(ValidationFailure::HoleNotContained { hole: 0 })),
        ("HoleTouchOuter", Some(ValidationFailure::HoleTouchesExterior { hole: 0 })),
        ("OverlappingRings", Some(ValidationFailure::HoleNotContained { hole: 0 })),
        (
            "TwoOverlappingHoles",
            Some(ValidationFailure::HolesOverlap { first: 0, second: 1 }),
        ),
        ("CollinearPoints", Some(ValidationFailure::Collinear { ring: RingRole::Exterior })),
        ("ValidPolygon_case1", None),
        ("ValidPolygon_case2", None),
    ];

    let cases = reference_cases();
    assert_eq!(cases.len(), expected.len());
    for ((name, polygon), (expected_name, expected_failure)) in cases.iter().zip(expected) {
        assert_eq!(*name, expected_name);
        assert_eq!(failure_of(&validator, polygon), expected_failure, "case {}", name);
    }
}

/// Backend whose containment test always breaks
struct BrokenBackend;

impl GeometryBackend for BrokenBackend {
    fn contains(&self, _outer: &Ring, _inner: &Ring) -> Result<bool, BackendError> {
        Err(BackendError::Internal {
            operation: "contains",
            message: "index corrupted".into(),
        })
    }

    fn intersection_dimension(&self, a: &Ring, b: &Ring) -> Result<IntersectionDimension, BackendError> {
        GeoBackend::new().intersection_dimension(a, b)
    }

    fn is_topologically_valid(&self, _polygon: &Polygon) -> Result<bool, BackendError> {
        Ok(true)
    }

    fn polygons_intersect(&self, _a: &Polygon, _b: &Polygon) -> Result<bool, BackendError> {
        Ok(false)
    }
}

#[test]
fn test_backend_failure_is_reported_separately() {
    let validator = TopologyValidator::with_backend(ValidatorConfig::default(), BrokenBackend);
    let hole = ring(&[(2.0, 2.0), (5.0, 3.0), (3.0, 6.0), (2.0, 2.0)]);
    let outcome = validator.validate(&Polygon::new(square10(), vec![hole]));

    assert!(!outcome.is_valid());
    assert!(outcome.is_backend_error());
    assert_eq!(outcome.failure().unwrap().category(), FailureCategory::Backend);
    assert_eq!(
        outcome.reason().as_deref(),
        Some("Geometry backend failure: contains failed: index corrupted")
    );

    // Without holes the containment test never runs
    assert!(validator.validate(&Polygon::new(square10(), vec![])).is_valid());
}

#[test]
fn test_backend_failure_leaves_no_verdict() {
    let validator = TopologyValidator::with_backend(ValidatorConfig::default(), BrokenBackend);
    let hole = ring(&[(2.0, 2.0), (5.0, 3.0), (3.0, 6.0), (2.0, 2.0)]);
    let polygons = vec![Polygon::new(square10(), vec![hole]), Polygon::new(square10(), vec![])];

    let outcomes = validate_batch(&polygons, &validator, false);
    let mut store = MemoryStore::new();
    assert!(persist_outcomes(&outcomes, &mut store).is_empty());
    assert_eq!(store.lookup(0).unwrap(), None);
    assert_eq!(store.lookup(1).unwrap(), Some(false));

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!(summary, BatchSummary { total: 2, valid: 1, invalid: 0, backend_errors: 1 });
    assert_eq!(summary.exit_code(100), 1);
}

#[test]
fn test_point_input_conversions() {
    let from_arrays: Ring = [[0.0, 0.0], [1.0, 2.0]].into_iter().collect();
    assert_eq!(from_arrays.points()[1], Point::new(1.0, 2.0));
}
