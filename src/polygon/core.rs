//! Polygons with holes.

use super::ring::Ring;
use crate::error::EditError;
use crate::primitives::Point2;
use crate::tolerance::{Tolerance, DEFAULT_RELATIVE_EPSILON};
use num_traits::Float;

/// One exterior ring plus zero or more holes.
///
/// The exterior winds counter-clockwise and holes wind clockwise. Holes lie
/// inside the exterior and do not overlap each other.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon<F> {
    exterior: Ring<F>,
    holes: Vec<Ring<F>>,
}

impl<F: Float> Polygon<F> {
    /// Builds a hole-free polygon from a user-drawn point sequence.
    ///
    /// The points keep their order but the stored exterior is wound
    /// counter-clockwise.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidPolygon`] if the points are not a simple ring.
    ///
    /// # Example
    ///
    /// ```
    /// use polyedit::polygon::Polygon;
    /// use polyedit::Point2;
    ///
    /// let triangle = Polygon::from_points(vec![
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(0.0, 4.0),
    ///     Point2::new(4.0, 0.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(triangle.area(), 8.0);
    /// assert!(triangle.exterior().is_ccw());
    /// ```
    pub fn from_points(points: Vec<Point2<F>>) -> Result<Self, EditError> {
        let exterior = Ring::new(points)?.oriented(true);
        Ok(Self {
            exterior,
            holes: Vec::new(),
        })
    }

    /// Assembles a polygon from already-valid rings, normalizing winding.
    pub fn new(exterior: Ring<F>, holes: Vec<Ring<F>>) -> Self {
        Self {
            exterior: exterior.oriented(true),
            holes: holes.into_iter().map(|h| h.oriented(false)).collect(),
        }
    }

    #[inline]
    pub fn exterior(&self) -> &Ring<F> {
        &self.exterior
    }

    #[inline]
    pub fn holes(&self) -> &[Ring<F>] {
        &self.holes
    }

    /// Exterior first, then holes in order.
    pub fn rings(&self) -> impl Iterator<Item = &Ring<F>> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }

    /// Every vertex of every ring.
    pub fn vertices(&self) -> impl Iterator<Item = &Point2<F>> {
        self.rings().flat_map(|r| r.points().iter())
    }

    /// Enclosed area: exterior minus holes.
    pub fn area(&self) -> F {
        self.holes
            .iter()
            .fold(self.exterior.area(), |acc, h| acc - h.area())
    }

    /// `true` if the polygon has degenerated to no area.
    pub fn is_empty(&self) -> bool {
        let tol = Tolerance::for_points(self.vertices(), F::from(DEFAULT_RELATIVE_EPSILON).unwrap());
        self.is_empty_within(tol)
    }

    /// [`Polygon::is_empty`] with an explicit tolerance.
    pub fn is_empty_within(&self, tol: Tolerance<F>) -> bool {
        self.exterior.len() < 3 || self.area() <= tol.area
    }

    /// Point containment: inside the exterior and not inside any hole.
    ///
    /// Boundary points follow the half-open rule of
    /// [`polygon_contains`](super::polygon_contains) for each ring.
    pub fn contains(&self, point: Point2<F>) -> bool {
        self.exterior.contains(point) && !self.holes.iter().any(|h| h.contains(point))
    }

    pub fn bounding_box(&self) -> Option<(Point2<F>, Point2<F>)> {
        self.exterior.bounding_box()
    }
}
