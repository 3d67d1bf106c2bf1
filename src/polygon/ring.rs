//! Closed rings of points: the boundary type for exteriors and holes.

use crate::error::EditError;
use crate::polygon::validate::validate_ring;
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{Tolerance, DEFAULT_RELATIVE_EPSILON};
use num_traits::Float;
use tracing::debug;

/// An implicitly closed sequence of points.
///
/// The first point is not repeated at the end. Rings built with
/// [`Ring::new`] are checked to be simple; [`Ring::from_raw`] trusts its
/// caller and is used for machine-generated boundaries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring<F> {
    points: Vec<Point2<F>>,
}

impl<F: Float> Ring<F> {
    /// Validates `points` and builds a ring.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidPolygon`] if the points do not form a
    /// simple ring with at least three distinct vertices and non-zero area.
    ///
    /// # Example
    ///
    /// ```
    /// use polyedit::polygon::Ring;
    /// use polyedit::Point2;
    ///
    /// let ok = Ring::new(vec![
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(1.0, 0.0),
    ///     Point2::new(0.0, 1.0),
    /// ]);
    /// assert!(ok.is_ok());
    ///
    /// let bow_tie = Ring::new(vec![
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(2.0, 2.0),
    ///     Point2::new(2.0, 0.0),
    ///     Point2::new(0.0, 2.0),
    /// ]);
    /// assert!(bow_tie.is_err());
    /// ```
    pub fn new(points: Vec<Point2<F>>) -> Result<Self, EditError> {
        let tol = Tolerance::for_points(points.iter(), F::from(DEFAULT_RELATIVE_EPSILON).unwrap());
        if let Err(defect) = validate_ring(&points, tol) {
            debug!(%defect, points = points.len(), "rejected ring");
            return Err(EditError::InvalidPolygon);
        }
        Ok(Self { points })
    }

    /// Builds a ring without validation.
    #[inline]
    pub fn from_raw(points: Vec<Point2<F>>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point2<F>] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point2<F>> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates the closing edges of the ring, last-to-first included.
    pub fn edges(&self) -> impl Iterator<Item = Segment2<F>> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment2::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> F {
        polygon_signed_area(&self.points)
    }

    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > F::zero()
    }

    /// Returns the ring wound counter-clockwise (`ccw = true`) or clockwise.
    pub fn oriented(mut self, ccw: bool) -> Self {
        if self.is_ccw() != ccw {
            self.points.reverse();
        }
        self
    }

    /// Even-odd containment test; see [`polygon_contains`].
    pub fn contains(&self, point: Point2<F>) -> bool {
        polygon_contains(&self.points, point)
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounding_box(&self) -> Option<(Point2<F>, Point2<F>)> {
        let first = *self.points.first()?;
        Some(self.points[1..].iter().fold((first, first), |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// `true` if `other` is the same closed loop, regardless of start vertex.
    pub fn same_loop(&self, other: &Self, eps: F) -> bool {
        let n = self.points.len();
        if n != other.points.len() {
            return false;
        }
        if n == 0 {
            return true;
        }
        (0..n).any(|offset| {
            (0..n).all(|i| self.points[i].approx_eq(other.points[(i + offset) % n], eps))
        })
    }
}

/// Computes the signed area of a closed vertex loop with the shoelace formula.
///
/// Positive for CCW winding, negative for CW winding.
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let n = vertices.len();
    let mut area = F::zero();
    for i in 0..n {
        let j = (i + 1) % n;
        area = area + vertices[i].x * vertices[j].y - vertices[j].x * vertices[i].y;
    }

    area / F::from(2.0).unwrap()
}

/// Ray-casting containment test over a closed vertex loop.
///
/// Uses the half-open crossing rule, so the result on the boundary is
/// deterministic: points on an edge whose interior lies above or to the
/// right of them count as inside, the opposite edges as outside.
pub fn polygon_contains<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = vertices.len();

    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}
