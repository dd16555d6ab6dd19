//! Reference polygons, one per failure class plus two valid ones.
//!
//! Rings follow the shapefile convention: clockwise exteriors,
//! counter-clockwise holes.

use crate::geometry::{Polygon, Ring};

fn ring(points: &[(f64, f64)]) -> Ring {
    points.iter().copied().collect()
}

fn simple(points: &[(f64, f64)]) -> Polygon {
    Polygon::new(ring(points), vec![])
}

fn with_holes(exterior: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Polygon {
    Polygon::new(ring(exterior), holes.iter().map(|h| ring(h)).collect())
}

pub fn reference_cases() -> Vec<(&'static str, Polygon)> {
    vec![
        (
            "SelfIntersecting",
            simple(&[(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0), (0.0, 0.0)]),
        ),
        (
            "DuplicatePoints",
            simple(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]),
        ),
        ("LessThanThree", simple(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)])),
        (
            "ReversedWinding",
            simple(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]),
        ),
        (
            "DisconnectedRings",
            with_holes(
                &[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)],
                &[&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 6.0), (5.0, 5.0)]],
            ),
        ),
        (
            "HoleTouchOuter",
            with_holes(
                &[(0.0, 0.0), (0.0, 5.0), (5.0, 5.0), (5.0, 0.0), (0.0, 0.0)],
                &[&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]],
            ),
        ),
        (
            "OverlappingRings",
            with_holes(
                &[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)],
                &[&[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0), (2.0, 2.0)]],
            ),
        ),
        (
            "TwoOverlappingHoles",
            with_holes(
                &[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)],
                &[
                    &[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0), (2.0, 2.0)],
                    &[(4.0, 4.0), (8.0, 4.0), (8.0, 8.0), (4.0, 8.0), (4.0, 4.0)],
                ],
            ),
        ),
        (
            "CollinearPoints",
            simple(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (0.0, 0.0)]),
        ),
        (
            "ValidPolygon_case1",
            simple(&[(10.0, 10.0), (10.0, 14.0), (14.0, 14.0), (14.0, 10.0), (10.0, 10.0)]),
        ),
        (
            "ValidPolygon_case2",
            with_holes(
                &[(10.0, 10.0), (10.0, 14.0), (14.0, 14.0), (14.0, 10.0), (10.0, 10.0)],
                &[&[(11.0, 11.0), (13.0, 11.0), (13.0, 13.0), (11.0, 13.0), (11.0, 11.0)]],
            ),
        ),
    ]
}
