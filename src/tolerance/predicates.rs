//! Geometric predicates with explicit tolerance.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `c` is left of the directed line `a -> b`.
    CounterClockwise,
    /// `c` is right of the directed line `a -> b`.
    Clockwise,
    /// `c` is within tolerance of the line.
    Collinear,
}

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// `eps` is a distance: `c` is collinear when its perpendicular distance to
/// the line is at most `eps`. A degenerate `a == b` line reports collinear.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let ab = b - a;
    let len = ab.magnitude();
    if len <= F::min_positive_value() {
        return Orientation::Collinear;
    }
    let dist = ab.cross(c - a) / len;

    if dist > eps {
        Orientation::CounterClockwise
    } else if dist < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// `true` if `p` is within distance `eps` of `segment`.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, eps: F) -> bool {
    segment.distance_squared_to_point(p) <= eps * eps
}

/// Result of a segment intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<F> {
    None,
    /// The segments meet at one point.
    Point {
        point: Point2<F>,
        /// Parameter along the first segment, clamped to `[0, 1]`.
        t1: F,
        /// Parameter along the second segment, clamped to `[0, 1]`.
        t2: F,
    },
    /// The segments are collinear and share a stretch of positive length.
    Overlapping { start: Point2<F>, end: Point2<F> },
}

/// Intersects two segments with distance tolerance `eps`.
///
/// Endpoints within `eps` of the other segment count as touching, and
/// segments whose endpoints all lie within `eps` of each other's line are
/// treated as collinear.
pub fn segments_intersect<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    eps: F,
) -> SegmentIntersection<F> {
    let len1 = s1.length_squared().sqrt();
    let len2 = s2.length_squared().sqrt();

    if s1.is_degenerate(eps) || s2.is_degenerate(eps) {
        let (point, seg) = if s1.is_degenerate(eps) {
            (s1.start, s2)
        } else {
            (s2.start, s1)
        };
        if !point_on_segment(point, seg, eps) {
            return SegmentIntersection::None;
        }
        let (_, t) = seg.closest_point(point);
        return if s1.is_degenerate(eps) {
            SegmentIntersection::Point { point, t1: F::zero(), t2: t }
        } else {
            SegmentIntersection::Point { point, t1: t, t2: F::zero() }
        };
    }

    let d1 = s1.direction();
    // Signed distances of s2's endpoints from the line through s1.
    let a = d1.cross(s2.start - s1.start) / len1;
    let b = d1.cross(s2.end - s1.start) / len1;

    if a.abs() <= eps && b.abs() <= eps {
        return collinear_overlap(s1, s2, eps, len1);
    }
    if (a > eps && b > eps) || (a < -eps && b < -eps) {
        return SegmentIntersection::None;
    }

    let d2 = s2.direction();
    let c = d2.cross(s1.start - s2.start) / len2;
    let d = d2.cross(s1.end - s2.start) / len2;
    if (c > eps && d > eps) || (c < -eps && d < -eps) {
        return SegmentIntersection::None;
    }

    // Snap to an endpoint when one lies on the other segment's line.
    let point = if a.abs() <= eps {
        s2.start
    } else if b.abs() <= eps {
        s2.end
    } else if c.abs() <= eps {
        s1.start
    } else if d.abs() <= eps {
        s1.end
    } else {
        s2.point_at(a / (a - b))
    };

    let t1 = s1.project(point);
    let t2 = s2.project(point);
    let slack1 = eps / len1;
    let slack2 = eps / len2;
    if t1 < -slack1 || t1 > F::one() + slack1 || t2 < -slack2 || t2 > F::one() + slack2 {
        return SegmentIntersection::None;
    }

    SegmentIntersection::Point {
        point,
        t1: t1.max(F::zero()).min(F::one()),
        t2: t2.max(F::zero()).min(F::one()),
    }
}

fn collinear_overlap<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    eps: F,
    len1: F,
) -> SegmentIntersection<F> {
    let ta = s1.project(s2.start);
    let tb = s1.project(s2.end);
    let (lo, hi) = if ta <= tb { (ta, tb) } else { (tb, ta) };

    let start = lo.max(F::zero());
    let end = hi.min(F::one());
    let slack = eps / len1;

    if start > end + slack {
        return SegmentIntersection::None;
    }
    if (end - start) * len1 <= eps {
        let point = s1.point_at(start.min(F::one()));
        return SegmentIntersection::Point {
            point,
            t1: start.min(F::one()),
            t2: s2.project(point).max(F::zero()).min(F::one()),
        };
    }

    SegmentIntersection::Overlapping {
        start: s1.point_at(start),
        end: s1.point_at(end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment2<f64> {
        Segment2::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[test]
    fn test_orient2d() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert_eq!(orient2d(a, b, Point2::new(0.5, 1.0), 1e-9), Orientation::CounterClockwise);
        assert_eq!(orient2d(a, b, Point2::new(0.5, -1.0), 1e-9), Orientation::Clockwise);
        assert_eq!(orient2d(a, b, Point2::new(3.0, 1e-12), 1e-9), Orientation::Collinear);
    }

    #[test]
    fn test_point_on_segment() {
        let s = seg(0.0, 0.0, 2.0, 0.0);
        assert!(point_on_segment(Point2::new(1.0, 0.0), s, 1e-9));
        assert!(!point_on_segment(Point2::new(1.0, 0.1), s, 1e-9));
        assert!(!point_on_segment(Point2::new(3.0, 0.0), s, 1e-9));
    }

    #[test]
    fn test_crossing() {
        match segments_intersect(seg(0.0, 0.0, 2.0, 2.0), seg(0.0, 2.0, 2.0, 0.0), 1e-9) {
            SegmentIntersection::Point { point, t1, t2 } => {
                assert_relative_eq!(point.x, 1.0, epsilon = 1e-12);
                assert_relative_eq!(point.y, 1.0, epsilon = 1e-12);
                assert_relative_eq!(t1, 0.5, epsilon = 1e-12);
                assert_relative_eq!(t2, 0.5, epsilon = 1e-12);
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_disjoint() {
        let r = segments_intersect(seg(0.0, 0.0, 1.0, 0.0), seg(0.0, 1.0, 1.0, 2.0), 1e-9);
        assert_eq!(r, SegmentIntersection::None);
        let r = segments_intersect(seg(0.0, 0.0, 1.0, 1.0), seg(2.0, 0.0, 3.0, -5.0), 1e-9);
        assert_eq!(r, SegmentIntersection::None);
    }

    #[test]
    fn test_t_junction_snaps_to_endpoint() {
        match segments_intersect(seg(0.0, 0.0, 4.0, 0.0), seg(2.0, 0.0, 2.0, 3.0), 1e-9) {
            SegmentIntersection::Point { point, t1, t2 } => {
                assert_eq!(point, Point2::new(2.0, 0.0));
                assert_relative_eq!(t1, 0.5);
                assert_eq!(t2, 0.0);
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_endpoint() {
        let r = segments_intersect(seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 1.0, 1.0), 1e-9);
        assert!(matches!(r, SegmentIntersection::Point { .. }));
    }

    #[test]
    fn test_collinear_overlap() {
        match segments_intersect(seg(0.0, 0.0, 3.0, 0.0), seg(4.0, 0.0, 1.0, 0.0), 1e-9) {
            SegmentIntersection::Overlapping { start, end } => {
                assert_relative_eq!(start.x, 1.0);
                assert_relative_eq!(end.x, 3.0);
            }
            other => panic!("expected overlap, got {:?}", other),
        }
    }

    #[test]
    fn test_collinear_touching_end_to_end() {
        let r = segments_intersect(seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 2.0, 0.0), 1e-9);
        match r {
            SegmentIntersection::Point { point, .. } => assert_eq!(point, Point2::new(1.0, 0.0)),
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_collinear_gap() {
        let r = segments_intersect(seg(0.0, 0.0, 1.0, 0.0), seg(2.0, 0.0, 3.0, 0.0), 1e-9);
        assert_eq!(r, SegmentIntersection::None);
    }
}
