//! Epsilon-aware predicates and the tolerance policy used by the polygon kernel.
//!
//! Every predicate takes its tolerance explicitly. [`Tolerance`] bundles the
//! distance and area thresholds so callers can scale them to the extent of
//! their input instead of relying on a fixed absolute epsilon.

mod predicates;
mod weld;

pub use predicates::{
    orient2d, point_on_segment, segments_intersect, Orientation, SegmentIntersection,
};
pub use weld::Welder;

use crate::primitives::Point2;
use num_traits::Float;

/// Relative epsilon applied when nothing else is configured.
pub const DEFAULT_RELATIVE_EPSILON: f64 = 1e-9;

/// Distance and area thresholds for geometric comparisons.
///
/// Two points closer than `distance` are the same point. A ring whose
/// absolute area is at most `area` is a sliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<F> {
    pub distance: F,
    pub area: F,
}

impl<F: Float> Tolerance<F> {
    /// Creates a tolerance with explicit thresholds.
    pub fn new(distance: F, area: F) -> Self {
        Self { distance, area }
    }

    /// Scales a relative epsilon by the extent of the input.
    ///
    /// Extents below one are treated as one so tiny inputs do not collapse
    /// the thresholds to zero.
    pub fn scaled(relative: F, extent: F) -> Self {
        let scale = extent.max(F::one());
        let distance = relative * scale;
        Self {
            distance,
            area: distance * scale,
        }
    }

    /// Builds a tolerance from the bounding extent of `points`.
    pub fn for_points<'a, I>(points: I, relative: F) -> Self
    where
        I: IntoIterator<Item = &'a Point2<F>>,
        F: 'a,
    {
        let mut min: Option<Point2<F>> = None;
        let mut max: Option<Point2<F>> = None;
        for p in points {
            min = Some(match min {
                Some(m) => Point2::new(m.x.min(p.x), m.y.min(p.y)),
                None => *p,
            });
            max = Some(match max {
                Some(m) => Point2::new(m.x.max(p.x), m.y.max(p.y)),
                None => *p,
            });
        }
        let extent = match (min, max) {
            (Some(lo), Some(hi)) => (hi.x - lo.x).max(hi.y - lo.y).max(
                lo.x.abs()
                    .max(lo.y.abs())
                    .max(hi.x.abs())
                    .max(hi.y.abs()),
            ),
            _ => F::one(),
        };
        Self::scaled(relative, extent)
    }
}

impl<F: Float> Default for Tolerance<F> {
    fn default() -> Self {
        Self::scaled(F::from(DEFAULT_RELATIVE_EPSILON).unwrap(), F::one())
    }
}
