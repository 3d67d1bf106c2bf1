//! Polygon edge as a 2D line segment.

use super::{Point2, Vec2};
use num_traits::Float;

/// A directed segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`.
    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    #[inline]
    pub fn length_squared(self) -> F {
        self.start.distance_squared(self.end)
    }

    #[inline]
    pub fn midpoint(self) -> Point2<F> {
        self.start.midpoint(self.end)
    }

    /// Point at parameter `t`; `0` is `start`, `1` is `end`.
    #[inline]
    pub fn point_at(self, t: F) -> Point2<F> {
        self.start.lerp(self.end, t)
    }

    /// Unclamped projection parameter of `p` onto the supporting line.
    ///
    /// Returns zero for a degenerate segment.
    #[inline]
    pub fn project(self, p: Point2<F>) -> F {
        let v = self.direction();
        let len_sq = v.magnitude_squared();
        if len_sq <= F::min_positive_value() {
            return F::zero();
        }
        (p - self.start).dot(v) / len_sq
    }

    /// Closest point on the segment to `p`, with its parameter in `[0, 1]`.
    pub fn closest_point(self, p: Point2<F>) -> (Point2<F>, F) {
        let t = self.project(p).max(F::zero()).min(F::one());
        (self.point_at(t), t)
    }

    #[inline]
    pub fn distance_squared_to_point(self, p: Point2<F>) -> F {
        let (closest, _) = self.closest_point(p);
        p.distance_squared(closest)
    }

    /// `true` when both endpoints are within `eps` of each other.
    #[inline]
    pub fn is_degenerate(self, eps: F) -> bool {
        self.length_squared() <= eps * eps
    }
}
