//! Polygon boolean operations.
//!
//! Pairwise helpers (`polygon_union`, ...) work on two polygons with the
//! default tolerance. [`BooleanEngine`] runs the n-ary operations the editor
//! triggers, with a tolerance scaled to the whole selection.

use super::core::Polygon;
use super::overlay::{overlay, BooleanOp};
use crate::error::{EditError, SetOperation};
use crate::tolerance::{Tolerance, DEFAULT_RELATIVE_EPSILON};
use num_traits::Float;
use std::slice;
use tracing::debug;

/// Computes the intersection of two polygons.
///
/// # Example
///
/// ```
/// use polyedit::polygon::{Polygon, polygon_intersection};
/// use polyedit::Point2;
///
/// let square1: Polygon<f64> = Polygon::from_points(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ]).unwrap();
///
/// let square2 = Polygon::from_points(vec![
///     Point2::new(1.0, 1.0),
///     Point2::new(3.0, 1.0),
///     Point2::new(3.0, 3.0),
///     Point2::new(1.0, 3.0),
/// ]).unwrap();
///
/// let result = polygon_intersection(&square1, &square2);
/// assert_eq!(result.len(), 1);
/// assert!((result[0].area() - 1.0).abs() < 1e-9);
/// ```
pub fn polygon_intersection<F: Float>(a: &Polygon<F>, b: &Polygon<F>) -> Vec<Polygon<F>> {
    pairwise(a, b, BooleanOp::Intersection)
}

/// Computes the union of two polygons.
///
/// Overlapping or edge-sharing inputs merge into one polygon; disjoint
/// inputs, including ones that only touch at a point, stay separate.
pub fn polygon_union<F: Float>(a: &Polygon<F>, b: &Polygon<F>) -> Vec<Polygon<F>> {
    pairwise(a, b, BooleanOp::Union)
}

/// Computes `a - b`.
///
/// The result may have holes (when `b` lies inside `a`) or several pieces
/// (when `b` cuts across `a`).
///
/// # Example
///
/// ```
/// use polyedit::polygon::{Polygon, polygon_difference};
/// use polyedit::Point2;
///
/// let outer = Polygon::from_points(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 4.0),
///     Point2::new(0.0, 4.0),
/// ]).unwrap();
/// let inner = Polygon::from_points(vec![
///     Point2::new(1.0, 1.0),
///     Point2::new(3.0, 1.0),
///     Point2::new(3.0, 3.0),
///     Point2::new(1.0, 3.0),
/// ]).unwrap();
///
/// let frame = polygon_difference(&outer, &inner);
/// assert_eq!(frame.len(), 1);
/// assert_eq!(frame[0].holes().len(), 1);
/// ```
pub fn polygon_difference<F: Float>(a: &Polygon<F>, b: &Polygon<F>) -> Vec<Polygon<F>> {
    pairwise(a, b, BooleanOp::Difference)
}

/// Computes the symmetric difference of two polygons.
pub fn polygon_xor<F: Float>(a: &Polygon<F>, b: &Polygon<F>) -> Vec<Polygon<F>> {
    pairwise(a, b, BooleanOp::Xor)
}

fn pairwise<F: Float>(a: &Polygon<F>, b: &Polygon<F>, op: BooleanOp) -> Vec<Polygon<F>> {
    let tol = Tolerance::for_points(
        a.vertices().chain(b.vertices()),
        F::from(DEFAULT_RELATIVE_EPSILON).unwrap(),
    );
    overlay(slice::from_ref(a), slice::from_ref(b), op, tol)
}

/// Runs the editor's set operations over a selection of polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BooleanEngine<F> {
    relative_epsilon: F,
}

impl<F: Float> Default for BooleanEngine<F> {
    fn default() -> Self {
        Self::new(F::from(DEFAULT_RELATIVE_EPSILON).unwrap())
    }
}

impl<F: Float> BooleanEngine<F> {
    /// Creates an engine whose distance tolerance is `relative_epsilon`
    /// times the extent of each selection.
    pub fn new(relative_epsilon: F) -> Self {
        Self { relative_epsilon }
    }

    pub fn relative_epsilon(&self) -> F {
        self.relative_epsilon
    }

    /// Dispatches to [`union`](Self::union), [`intersection`](Self::intersection)
    /// or [`difference`](Self::difference).
    pub fn apply(
        &self,
        operation: SetOperation,
        polygons: &[Polygon<F>],
    ) -> Result<Vec<Polygon<F>>, EditError> {
        match operation {
            SetOperation::Union => self.union(polygons),
            SetOperation::Intersection => self.intersection(polygons),
            SetOperation::Difference => self.difference(polygons),
        }
    }

    /// Merges all inputs into the minimal set of polygons covering them.
    ///
    /// # Errors
    ///
    /// [`EditError::InsufficientSelection`] for fewer than two inputs.
    pub fn union(&self, polygons: &[Polygon<F>]) -> Result<Vec<Polygon<F>>, EditError> {
        require_selection(SetOperation::Union, polygons)?;
        let tol = self.tolerance(polygons);
        let merged = merge(polygons, tol);
        debug!(inputs = polygons.len(), outputs = merged.len(), "union");
        Ok(merged)
    }

    /// Left fold of pairwise intersections: `p0 ∩ p1 ∩ p2 ∩ ...`.
    ///
    /// # Errors
    ///
    /// [`EditError::InsufficientSelection`] for fewer than two inputs and
    /// [`EditError::EmptyResult`] as soon as the running result is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use polyedit::polygon::{BooleanEngine, Polygon};
    /// use polyedit::{EditError, Point2, SetOperation};
    ///
    /// let square = |x: f64, y: f64| Polygon::from_points(vec![
    ///     Point2::new(x, y),
    ///     Point2::new(x + 1.0, y),
    ///     Point2::new(x + 1.0, y + 1.0),
    ///     Point2::new(x, y + 1.0),
    /// ]).unwrap();
    ///
    /// let engine = BooleanEngine::default();
    /// let err = engine.intersection(&[square(0.0, 0.0), square(5.0, 5.0)]);
    /// assert_eq!(err, Err(EditError::EmptyResult { operation: SetOperation::Intersection }));
    /// ```
    pub fn intersection(&self, polygons: &[Polygon<F>]) -> Result<Vec<Polygon<F>>, EditError> {
        require_selection(SetOperation::Intersection, polygons)?;
        let tol = self.tolerance(polygons);

        let mut acc = vec![polygons[0].clone()];
        for (step, p) in polygons[1..].iter().enumerate() {
            acc = overlay(&acc, slice::from_ref(p), BooleanOp::Intersection, tol);
            if acc.is_empty() {
                debug!(step = step + 1, "intersection became empty");
                return Err(EditError::EmptyResult {
                    operation: SetOperation::Intersection,
                });
            }
        }

        debug!(inputs = polygons.len(), outputs = acc.len(), "intersection");
        Ok(acc)
    }

    /// For each input `i`, subtracts the union of every other input.
    ///
    /// Inputs that are fully covered by the others contribute nothing.
    ///
    /// # Errors
    ///
    /// [`EditError::InsufficientSelection`] for fewer than two inputs.
    pub fn difference(&self, polygons: &[Polygon<F>]) -> Result<Vec<Polygon<F>>, EditError> {
        require_selection(SetOperation::Difference, polygons)?;
        let tol = self.tolerance(polygons);

        let mut out = Vec::new();
        for (i, base) in polygons.iter().enumerate() {
            let others: Vec<Polygon<F>> = polygons
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, p)| p.clone())
                .collect();
            let cover = merge(&others, tol);
            let pieces = overlay(slice::from_ref(base), &cover, BooleanOp::Difference, tol);
            if pieces.is_empty() {
                debug!(input = i, "difference consumed input");
                continue;
            }
            out.extend(pieces);
        }

        debug!(inputs = polygons.len(), outputs = out.len(), "difference");
        Ok(out)
    }

    fn tolerance(&self, polygons: &[Polygon<F>]) -> Tolerance<F> {
        Tolerance::for_points(polygons.iter().flat_map(|p| p.vertices()), self.relative_epsilon)
    }
}

fn require_selection<F>(operation: SetOperation, polygons: &[Polygon<F>]) -> Result<(), EditError> {
    if polygons.len() < 2 {
        return Err(EditError::InsufficientSelection {
            operation,
            selected: polygons.len(),
        });
    }
    Ok(())
}

/// Unions any number of polygons by folding pairwise overlays.
fn merge<F: Float>(polygons: &[Polygon<F>], tol: Tolerance<F>) -> Vec<Polygon<F>> {
    let Some((first, rest)) = polygons.split_first() else {
        return Vec::new();
    };
    rest.iter().fold(vec![first.clone()], |acc, p| {
        overlay(&acc, slice::from_ref(p), BooleanOp::Union, tol)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point2;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Polygon::from_points(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
        .unwrap()
    }

    fn total_area(polys: &[Polygon<f64>]) -> f64 {
        polys.iter().map(|p| p.area()).sum()
    }

    #[test]
    fn test_requires_two_inputs() {
        let engine = BooleanEngine::default();
        let one = [rect(0.0, 0.0, 1.0, 1.0)];
        for op in [SetOperation::Union, SetOperation::Intersection, SetOperation::Difference] {
            assert_eq!(
                engine.apply(op, &one),
                Err(EditError::InsufficientSelection {
                    operation: op,
                    selected: 1
                })
            );
        }
        assert!(matches!(
            engine.union(&[]),
            Err(EditError::InsufficientSelection { selected: 0, .. })
        ));
    }

    #[test]
    fn test_union_of_disjoint_inputs_keeps_each() {
        let engine = BooleanEngine::default();
        let inputs = [
            rect(0.0, 0.0, 1.0, 1.0),
            rect(3.0, 0.0, 4.0, 1.0),
            rect(0.0, 3.0, 1.0, 4.0),
        ];
        let out = engine.union(&inputs).unwrap();
        assert_eq!(out.len(), 3);
        for input in &inputs {
            assert!(out
                .iter()
                .any(|p| p.exterior().same_loop(input.exterior(), 1e-12)));
        }
    }

    #[test]
    fn test_union_of_overlapping_squares() {
        let engine = BooleanEngine::default();
        let out = engine
            .union(&[rect(0.0, 0.0, 2.0, 2.0), rect(1.0, 1.0, 3.0, 3.0)])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].area() < 8.0);
        assert_relative_eq!(out[0].area(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_union_chain_bridges_disjoint_pieces() {
        let engine = BooleanEngine::default();
        // The middle bar overlaps both outer squares, which do not overlap each other.
        let out = engine
            .union(&[
                rect(0.0, 0.0, 2.0, 2.0),
                rect(4.0, 0.0, 6.0, 2.0),
                rect(1.0, 0.5, 5.0, 1.5),
            ])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].area(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_union_of_ring_pieces_creates_hole() {
        let engine = BooleanEngine::default();
        let out = engine
            .union(&[
                rect(0.0, 0.0, 4.0, 1.0),
                rect(0.0, 3.0, 4.0, 4.0),
                rect(0.0, 0.0, 1.0, 4.0),
                rect(3.0, 0.0, 4.0, 4.0),
            ])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].holes().len(), 1);
        assert_relative_eq!(out[0].area(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersection_order_independent() {
        let engine = BooleanEngine::default();
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(1.0, 1.0, 5.0, 5.0);
        let c = rect(2.0, -1.0, 3.0, 6.0);
        let abc = engine.intersection(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let cab = engine.intersection(&[c, a, b]).unwrap();
        assert_relative_eq!(total_area(&abc), 3.0, epsilon = 1e-9);
        assert_relative_eq!(total_area(&abc), total_area(&cab), epsilon = 1e-9);
    }

    #[test]
    fn test_intersection_empty_midway() {
        let engine = BooleanEngine::default();
        let r = engine.intersection(&[
            rect(0.0, 0.0, 2.0, 2.0),
            rect(1.0, 1.0, 3.0, 3.0),
            rect(2.5, 2.5, 4.0, 4.0),
        ]);
        assert_eq!(
            r,
            Err(EditError::EmptyResult {
                operation: SetOperation::Intersection
            })
        );
    }

    #[test]
    fn test_difference_of_overlapping_squares() {
        let engine = BooleanEngine::default();
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.0, 1.0, 3.0, 3.0);
        let out = engine.difference(&[a, b]).unwrap();
        // a - b and b - a.
        assert_eq!(out.len(), 2);
        assert_relative_eq!(out[0].area(), 4.0 - 1.0, epsilon = 1e-9);
        assert_relative_eq!(out[1].area(), 4.0 - 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_difference_split_into_two() {
        let engine = BooleanEngine::default();
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let bar = rect(1.5, -1.0, 2.5, 5.0);
        let out = engine.difference(&[a, bar]).unwrap();
        // Two halves of a, plus the two bar ends sticking out of a.
        assert_eq!(out.len(), 4);
        assert_relative_eq!(total_area(&out[..2]), 12.0, epsilon = 1e-9);
        assert_relative_eq!(total_area(&out[2..]), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_difference_skips_consumed_input() {
        let engine = BooleanEngine::default();
        let outer = rect(0.0, 0.0, 4.0, 4.0);
        let inner = rect(1.0, 1.0, 2.0, 2.0);
        let out = engine.difference(&[outer, inner]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].holes().len(), 1);
        assert_relative_eq!(out[0].area(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pairwise_helpers() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.0, 0.0, 3.0, 2.0);
        assert_relative_eq!(total_area(&polygon_union(&a, &b)), 6.0, epsilon = 1e-9);
        assert_relative_eq!(total_area(&polygon_intersection(&a, &b)), 2.0, epsilon = 1e-9);
        assert_relative_eq!(total_area(&polygon_difference(&a, &b)), 2.0, epsilon = 1e-9);
        assert_relative_eq!(total_area(&polygon_xor(&a, &b)), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_screen_coordinates() {
        let engine = BooleanEngine::default();
        let a = rect(100.0, 100.0, 400.0, 300.0);
        let b = rect(250.0, 200.0, 600.0, 500.0);
        let out = engine.intersection(&[a, b]).unwrap();
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].area(), 150.0 * 100.0, epsilon = 1e-6);
    }
}
