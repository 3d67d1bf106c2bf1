//! Ring validation: the simplicity check applied before a drawn polygon is
//! accepted.
//!
//! # Example
//!
//! ```
//! use polyedit::polygon::{validate_ring, RingDefect};
//! use polyedit::tolerance::Tolerance;
//! use polyedit::Point2;
//!
//! // A figure-8 crosses itself between edges 0 and 2.
//! let figure8 = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(0.0, 2.0),
//! ];
//! assert_eq!(
//!     validate_ring(&figure8, Tolerance::default()),
//!     Err(RingDefect::SelfIntersection { first_edge: 0, second_edge: 2 })
//! );
//! ```

use super::ring::{polygon_signed_area, Ring};
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{
    orient2d, segments_intersect, Orientation, SegmentIntersection, Tolerance,
    DEFAULT_RELATIVE_EPSILON,
};
use num_traits::Float;
use thiserror::Error;

/// The first problem found in a candidate ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingDefect {
    #[error("ring has {count} points, at least 3 are required")]
    TooFewPoints { count: usize },

    #[error("point {index} repeats the previous point")]
    DuplicatePoint { index: usize },

    #[error("ring encloses no area")]
    ZeroArea,

    #[error("edges at vertex {index} fold back on each other")]
    FoldedEdge { index: usize },

    #[error("edge {first_edge} intersects edge {second_edge}")]
    SelfIntersection {
        first_edge: usize,
        second_edge: usize,
    },
}

/// Checks that `points` form a simple ring.
///
/// Edge `i` runs from point `i` to point `i + 1` (wrapping). Non-adjacent
/// edges may not touch at all, adjacent edges may only share their common
/// vertex.
pub fn validate_ring<F: Float>(points: &[Point2<F>], tol: Tolerance<F>) -> Result<(), RingDefect> {
    let n = points.len();
    if n < 3 {
        return Err(RingDefect::TooFewPoints { count: n });
    }

    let eps = tol.distance;
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        if prev.approx_eq(points[i], eps) {
            return Err(RingDefect::DuplicatePoint { index: i });
        }
    }

    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        if orient2d(prev, cur, next, eps) == Orientation::Collinear
            && (prev - cur).dot(next - cur) > F::zero()
        {
            return Err(RingDefect::FoldedEdge { index: i });
        }
    }

    let edge = |i: usize| Segment2::new(points[i], points[(i + 1) % n]);
    for i in 0..n {
        for j in (i + 2)..n {
            // Edge n-1 and edge 0 share point 0.
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments_intersect(edge(i), edge(j), eps) != SegmentIntersection::None {
                return Err(RingDefect::SelfIntersection {
                    first_edge: i,
                    second_edge: j,
                });
            }
        }
    }

    if polygon_signed_area(points).abs() <= tol.area {
        return Err(RingDefect::ZeroArea);
    }

    Ok(())
}

/// `true` iff the ring is simple under the default tolerance policy.
pub fn is_simple<F: Float>(ring: &Ring<F>) -> bool {
    is_simple_points(ring.points())
}

/// Point-slice form of [`is_simple`], used on the in-progress polygon.
pub fn is_simple_points<F: Float>(points: &[Point2<F>]) -> bool {
    let tol = Tolerance::for_points(points.iter(), F::from(DEFAULT_RELATIVE_EPSILON).unwrap());
    validate_ring(points, tol).is_ok()
}
