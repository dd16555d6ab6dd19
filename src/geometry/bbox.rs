//! Axis-aligned bounding-box prefilter
//!
//! A `false` answer is authoritative (the shapes cannot intersect); `true`
//! only means a precise test is worth running.

use super::types::{Point, Ring};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Box around a set of points, `None` when there are no points
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self {
            min: *first,
            max: *first,
        };
        Some(rest.iter().fold(init, |b, p| Self {
            min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        }))
    }

    pub fn of_ring(ring: &Ring) -> Option<Self> {
        Self::from_points(ring.points())
    }

    /// Closed-interval overlap on both axes; boxes that only touch overlap.
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// True as soon as one candidate's box overlaps the target's box.
///
/// Empty rings have no box and never overlap anything.
pub fn bounding_boxes_overlap(target: &Ring, candidates: &[Ring]) -> bool {
    let Some(target_box) = BoundingBox::of_ring(target) else {
        return false;
    };
    candidates
        .iter()
        .filter_map(BoundingBox::of_ring)
        .any(|b| target_box.overlaps(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Ring {
        points.iter().copied().collect()
    }

    #[test]
    fn test_bbox_extents() {
        let b = BoundingBox::of_ring(&ring(&[(3.0, -1.0), (-2.0, 4.0), (1.0, 1.0)])).unwrap();
        assert_eq!(b.min, Point::new(-2.0, -1.0));
        assert_eq!(b.max, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_touching_boxes_overlap() {
        let a = ring(&[(0.0, 0.0), (1.0, 1.0)]);
        let b = ring(&[(1.0, 1.0), (2.0, 2.0)]);
        assert!(bounding_boxes_overlap(&a, &[b]));
    }

    #[test]
    fn test_empty_inputs() {
        let a = ring(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(!bounding_boxes_overlap(&a, &[]));
        assert!(!bounding_boxes_overlap(&Ring::default(), &[a.clone()]));
        assert!(!bounding_boxes_overlap(&a, &[Ring::default()]));
    }

    #[test]
    fn test_any_candidate_overlapping_is_enough() {
        let target = ring(&[(0.0, 0.0), (2.0, 2.0)]);
        let far = ring(&[(10.0, 10.0), (11.0, 11.0)]);
        let near = ring(&[(1.0, 1.0), (3.0, 3.0)]);
        assert!(bounding_boxes_overlap(&target, &[far.clone(), near]));
        assert!(!bounding_boxes_overlap(&target, &[far]));
    }
}
