//! Planar overlay of two polygon sets.
//!
//! Both operands are split into sub-edges at every crossing, T-junction and
//! collinear overlap. Sub-edge endpoints are welded into shared nodes, so two
//! sub-edges lying on top of each other end up with identical node ids. Each
//! sub-edge is then classified against the other operand and kept or dropped
//! depending on the operation. The kept edges all have the result's interior
//! on their left; they are linked into closed loops, loops are split where
//! they touch themselves, and signed area sorts the loops into exteriors and
//! holes.

use super::core::Polygon;
use super::ring::{polygon_contains, Ring};
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{
    orient2d, segments_intersect, Orientation, SegmentIntersection, Tolerance, Welder,
};
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{trace, warn};

/// Boolean operation between a subject set and a clip set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Union,
    Intersection,
    /// Subject minus clip.
    Difference,
    /// Area covered by exactly one operand.
    Xor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Subject,
    Clip,
}

/// Where a sub-edge sits relative to the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Inside,
    Outside,
    /// The other operand has the same edge in the same direction.
    SharedSame,
    /// The other operand has the same edge in the opposite direction.
    SharedOpposite,
}

#[derive(Debug, Clone, Copy)]
struct InputEdge<F> {
    segment: Segment2<F>,
    operand: Operand,
}

#[derive(Debug, Clone, Copy)]
struct SubEdge {
    from: usize,
    to: usize,
    operand: Operand,
}

/// Computes `subject <op> clip`.
///
/// Each operand must be a set of non-overlapping polygons with CCW
/// exteriors and CW holes (the invariant [`Polygon`] maintains). The result
/// satisfies the same invariant. Rings whose area is within `tol.area` are
/// dropped.
pub fn overlay<F: Float>(
    subject: &[Polygon<F>],
    clip: &[Polygon<F>],
    op: BooleanOp,
    tol: Tolerance<F>,
) -> Vec<Polygon<F>> {
    let mut welder = Welder::new(tol.distance);
    let inputs = collect_edges(subject, clip, &mut welder, tol);
    let sub_edges = split_edges(&inputs, &mut welder, tol);
    let selected = select_edges(&sub_edges, &welder, subject, clip, op);
    let selected = cancel_opposites(selected);
    let loops = trace_loops(&selected, &welder);
    let result = assemble(loops, &welder, tol);

    trace!(
        ?op,
        inputs = inputs.len(),
        sub_edges = sub_edges.len(),
        kept = selected.len(),
        polygons = result.len(),
        "overlay"
    );
    result
}

fn collect_edges<F: Float>(
    subject: &[Polygon<F>],
    clip: &[Polygon<F>],
    welder: &mut Welder<F>,
    tol: Tolerance<F>,
) -> Vec<InputEdge<F>> {
    let mut edges = Vec::new();
    for (operand, polygons) in [(Operand::Subject, subject), (Operand::Clip, clip)] {
        for ring in polygons.iter().flat_map(|p| p.rings()) {
            for segment in ring.edges() {
                // Original vertices are welded first so they stay the node
                // representatives.
                welder.insert(segment.start);
                if !segment.is_degenerate(tol.distance) {
                    edges.push(InputEdge { segment, operand });
                }
            }
        }
    }
    edges
}

fn split_edges<F: Float>(
    inputs: &[InputEdge<F>],
    welder: &mut Welder<F>,
    tol: Tolerance<F>,
) -> Vec<SubEdge> {
    let mut out = Vec::new();

    for (i, edge) in inputs.iter().enumerate() {
        let seg = edge.segment;
        let mut cuts: Vec<(F, Point2<F>)> = vec![(F::zero(), seg.start), (F::one(), seg.end)];

        for (j, other) in inputs.iter().enumerate() {
            if i == j {
                continue;
            }
            match segments_intersect(seg, other.segment, tol.distance) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { point, t1, .. } => cuts.push((t1, point)),
                SegmentIntersection::Overlapping { start, end } => {
                    cuts.push((seg.project(start), start));
                    cuts.push((seg.project(end), end));
                }
            }
        }

        cuts.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut prev = welder.insert(seg.start);
        for &(_, point) in &cuts[1..] {
            let id = welder.insert(point);
            if id != prev {
                out.push(SubEdge {
                    from: prev,
                    to: id,
                    operand: edge.operand,
                });
                prev = id;
            }
        }
    }

    out
}

/// Even-odd containment over every ring of a non-overlapping polygon set.
fn set_contains<F: Float>(polygons: &[Polygon<F>], point: Point2<F>) -> bool {
    polygons
        .iter()
        .flat_map(|p| p.rings())
        .filter(|r| polygon_contains(r.points(), point))
        .count()
        % 2
        == 1
}

fn classify<F: Float>(
    edge: SubEdge,
    other_keys: &HashSet<(usize, usize)>,
    other: &[Polygon<F>],
    welder: &Welder<F>,
) -> Side {
    if other_keys.contains(&(edge.from, edge.to)) {
        Side::SharedSame
    } else if other_keys.contains(&(edge.to, edge.from)) {
        Side::SharedOpposite
    } else {
        let mid = welder.point(edge.from).midpoint(welder.point(edge.to));
        if set_contains(other, mid) {
            Side::Inside
        } else {
            Side::Outside
        }
    }
}

/// Whether a classified sub-edge belongs to the result, and if so whether
/// it must be reversed to keep the interior on its left.
fn keep(op: BooleanOp, operand: Operand, side: Side) -> Option<bool> {
    use BooleanOp::*;
    use Operand::*;
    use Side::*;

    match (op, operand, side) {
        (Union, _, Outside) => Some(false),
        (Union, Subject, SharedSame) => Some(false),
        (Intersection, _, Inside) => Some(false),
        (Intersection, Subject, SharedSame) => Some(false),
        (Difference, Subject, Outside) => Some(false),
        (Difference, Subject, SharedOpposite) => Some(false),
        (Difference, Clip, Inside) => Some(true),
        (Xor, _, Outside) => Some(false),
        (Xor, _, Inside) => Some(true),
        _ => None,
    }
}

fn select_edges<F: Float>(
    sub_edges: &[SubEdge],
    welder: &Welder<F>,
    subject: &[Polygon<F>],
    clip: &[Polygon<F>],
    op: BooleanOp,
) -> Vec<(usize, usize)> {
    let keys = |operand: Operand| -> HashSet<(usize, usize)> {
        sub_edges
            .iter()
            .filter(|e| e.operand == operand)
            .map(|e| (e.from, e.to))
            .collect()
    };
    let subject_keys = keys(Operand::Subject);
    let clip_keys = keys(Operand::Clip);

    sub_edges
        .iter()
        .filter_map(|&edge| {
            let side = match edge.operand {
                Operand::Subject => classify(edge, &clip_keys, clip, welder),
                Operand::Clip => classify(edge, &subject_keys, subject, welder),
            };
            keep(op, edge.operand, side).map(|reverse| {
                if reverse {
                    (edge.to, edge.from)
                } else {
                    (edge.from, edge.to)
                }
            })
        })
        .collect()
}

/// Removes pairs of edges running in opposite directions between the same
/// nodes; they bound zero-width regions.
fn cancel_opposites(edges: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    let mut pending: HashMap<(usize, usize), usize> = HashMap::new();
    for &key in &edges {
        *pending.entry(key).or_insert(0) += 1;
    }

    let mut kept = Vec::with_capacity(edges.len());
    for (u, v) in edges {
        let forward = pending.get(&(u, v)).copied().unwrap_or(0);
        if forward == 0 {
            continue;
        }
        let backward = pending.get(&(v, u)).copied().unwrap_or(0);
        if backward > 0 {
            pending.insert((u, v), forward - 1);
            pending.insert((v, u), backward - 1);
            continue;
        }
        pending.insert((u, v), forward - 1);
        kept.push((u, v));
    }
    kept
}

/// Links directed edges into closed node loops.
///
/// At a node with several unused outgoing edges the sharpest left turn wins,
/// which keeps the traced loop hugging the region on its left.
fn trace_loops<F: Float>(edges: &[(usize, usize)], welder: &Welder<F>) -> Vec<Vec<usize>> {
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    for (idx, &(from, _)) in edges.iter().enumerate() {
        outgoing.entry(from).or_default().push(idx);
    }

    let turn = |incoming: (usize, usize), candidate: usize| -> F {
        let d_in = welder.point(incoming.1) - welder.point(incoming.0);
        let (from, to) = edges[candidate];
        let d_out = welder.point(to) - welder.point(from);
        d_in.cross(d_out).atan2(d_in.dot(d_out))
    };

    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let origin = edges[start].0;
        let mut nodes = vec![origin];
        let mut current = start;

        loop {
            let (_, to) = edges[current];
            if to == origin {
                loops.push(nodes);
                break;
            }
            nodes.push(to);

            let next = outgoing.get(&to).and_then(|candidates| {
                candidates
                    .iter()
                    .copied()
                    .filter(|&c| !used[c])
                    .max_by(|&a, &b| {
                        turn(edges[current], a)
                            .partial_cmp(&turn(edges[current], b))
                            .unwrap_or(Ordering::Equal)
                    })
            });

            match next {
                Some(idx) => {
                    used[idx] = true;
                    current = idx;
                }
                None => {
                    warn!(node = to, "open chain in overlay result, discarding");
                    break;
                }
            }
        }
    }

    loops
}

/// Splits a loop wherever it revisits a node, yielding loops that touch
/// only at those nodes.
fn split_pinches(nodes: Vec<usize>) -> Vec<Vec<usize>> {
    let mut pieces = Vec::new();
    let mut stack: Vec<usize> = Vec::with_capacity(nodes.len());

    for node in nodes {
        if let Some(pos) = stack.iter().position(|&n| n == node) {
            let mut piece = vec![node];
            piece.extend(stack.drain(pos + 1..));
            pieces.push(piece);
        } else {
            stack.push(node);
        }
    }
    pieces.push(stack);
    pieces
}

/// Drops vertices that sit on the straight line between their neighbours.
fn drop_straight_vertices<F: Float>(mut points: Vec<Point2<F>>, eps: F) -> Vec<Point2<F>> {
    loop {
        let n = points.len();
        if n < 3 {
            return points;
        }
        let straight = (0..n).find(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            orient2d(prev, cur, next, eps) == Orientation::Collinear
                && (prev - cur).dot(next - cur) < F::zero()
        });
        match straight {
            Some(i) => {
                points.remove(i);
            }
            None => return points,
        }
    }
}

fn assemble<F: Float>(loops: Vec<Vec<usize>>, welder: &Welder<F>, tol: Tolerance<F>) -> Vec<Polygon<F>> {
    let mut shells: Vec<Ring<F>> = Vec::new();
    let mut holes: Vec<Ring<F>> = Vec::new();

    for piece in loops.into_iter().flat_map(split_pinches) {
        if piece.len() < 3 {
            continue;
        }
        let points = piece.iter().map(|&id| welder.point(id)).collect();
        let points = drop_straight_vertices(points, tol.distance);
        if points.len() < 3 {
            continue;
        }
        let ring = Ring::from_raw(points);
        let area = ring.signed_area();
        if area.abs() <= tol.area {
            continue;
        }
        if area > F::zero() {
            shells.push(ring);
        } else {
            holes.push(ring);
        }
    }

    let mut owned: Vec<Vec<Ring<F>>> = vec![Vec::new(); shells.len()];
    for hole in holes {
        let Some(probe) = hole.edges().next().map(|e| e.midpoint()) else {
            continue;
        };
        let owner = shells
            .iter()
            .enumerate()
            .filter(|(_, shell)| shell.contains(probe))
            .min_by(|a, b| a.1.area().partial_cmp(&b.1.area()).unwrap_or(Ordering::Equal))
            .map(|(i, _)| i);
        match owner {
            Some(i) => owned[i].push(hole),
            None => warn!("hole outside every exterior, discarding"),
        }
    }

    shells
        .into_iter()
        .zip(owned)
        .map(|(shell, holes)| Polygon::new(shell, holes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Polygon::new(
            Ring::from_raw(vec![
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ]),
            Vec::new(),
        )
    }

    fn total_area(polys: &[Polygon<f64>]) -> f64 {
        polys.iter().map(|p| p.area()).sum()
    }

    fn run(a: Polygon<f64>, b: Polygon<f64>, op: BooleanOp) -> Vec<Polygon<f64>> {
        overlay(&[a], &[b], op, Tolerance::default())
    }

    #[test]
    fn test_overlapping_squares_all_ops() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.0, 1.0, 3.0, 3.0);

        let union = run(a.clone(), b.clone(), BooleanOp::Union);
        assert_eq!(union.len(), 1);
        assert_relative_eq!(total_area(&union), 7.0, epsilon = 1e-9);
        assert_eq!(union[0].exterior().len(), 8);

        let inter = run(a.clone(), b.clone(), BooleanOp::Intersection);
        assert_eq!(inter.len(), 1);
        assert_relative_eq!(total_area(&inter), 1.0, epsilon = 1e-9);

        let diff = run(a.clone(), b.clone(), BooleanOp::Difference);
        assert_eq!(diff.len(), 1);
        assert_relative_eq!(total_area(&diff), 3.0, epsilon = 1e-9);

        let xor = run(a, b, BooleanOp::Xor);
        assert_eq!(xor.len(), 2);
        assert_relative_eq!(total_area(&xor), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_contained_square_makes_hole() {
        let outer = rect(0.0, 0.0, 4.0, 4.0);
        let inner = rect(1.0, 1.0, 3.0, 3.0);

        let diff = run(outer.clone(), inner.clone(), BooleanOp::Difference);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].holes().len(), 1);
        assert_relative_eq!(diff[0].area(), 12.0, epsilon = 1e-9);
        assert!(!diff[0].contains(Point2::new(2.0, 2.0)));
        assert!(diff[0].contains(Point2::new(0.5, 2.0)));

        let inter = run(outer.clone(), inner.clone(), BooleanOp::Intersection);
        assert_eq!(inter.len(), 1);
        assert!(inter[0].exterior().same_loop(inner.exterior(), 1e-12));

        let union = run(outer.clone(), inner, BooleanOp::Union);
        assert_eq!(union.len(), 1);
        assert!(union[0].exterior().same_loop(outer.exterior(), 1e-12));
    }

    #[test]
    fn test_shared_edge_union_merges() {
        let union = run(rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 0.0, 2.0, 1.0), BooleanOp::Union);
        assert_eq!(union.len(), 1);
        assert_eq!(union[0].exterior().len(), 4);
        assert_relative_eq!(union[0].area(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_partial_shared_edge_union() {
        // The right square's left edge covers only part of the left square's right edge.
        let union = run(rect(0.0, 0.0, 2.0, 2.0), rect(2.0, 0.5, 3.0, 1.5), BooleanOp::Union);
        assert_eq!(union.len(), 1);
        assert_relative_eq!(union[0].area(), 5.0, epsilon = 1e-9);
        assert_eq!(union[0].exterior().len(), 8);
    }

    #[test]
    fn test_corner_touching_union_stays_separate() {
        let union = run(rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 1.0, 2.0, 2.0), BooleanOp::Union);
        assert_eq!(union.len(), 2);
        assert_relative_eq!(total_area(&union), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_identical_squares() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(run(a.clone(), a.clone(), BooleanOp::Union).len(), 1);
        assert_eq!(run(a.clone(), a.clone(), BooleanOp::Intersection).len(), 1);
        assert!(run(a.clone(), a, BooleanOp::Difference).is_empty());
    }

    #[test]
    fn test_difference_shared_edge_inside() {
        // Clip covers the right half exactly.
        let diff = run(rect(0.0, 0.0, 2.0, 1.0), rect(1.0, 0.0, 2.0, 1.0), BooleanOp::Difference);
        assert_eq!(diff.len(), 1);
        assert_relative_eq!(diff[0].area(), 1.0, epsilon = 1e-9);
        assert!(diff[0].exterior().same_loop(rect(0.0, 0.0, 1.0, 1.0).exterior(), 1e-12));
    }

    #[test]
    fn test_bar_splits_square() {
        let diff = run(rect(0.0, 0.0, 4.0, 4.0), rect(-1.0, 1.5, 5.0, 2.5), BooleanOp::Difference);
        assert_eq!(diff.len(), 2);
        assert_relative_eq!(total_area(&diff), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hole_touching_exterior_at_vertex() {
        // The triangular notch touches the bottom edge of the square at (2, 0).
        let notch = Polygon::new(
            Ring::from_raw(vec![
                Point2::new(2.0, 0.0),
                Point2::new(3.0, 1.0),
                Point2::new(1.0, 1.0),
            ]),
            Vec::new(),
        );
        let diff = run(rect(0.0, 0.0, 4.0, 4.0), notch, BooleanOp::Difference);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].holes().len(), 1);
        assert_relative_eq!(diff[0].area(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_disjoint_intersection_is_empty() {
        let inter = run(rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 5.0, 6.0, 6.0), BooleanOp::Intersection);
        assert!(inter.is_empty());
    }

    #[test]
    fn test_concave_intersection_two_pieces() {
        // A U shape whose prongs both cross a horizontal bar.
        let u = Polygon::new(
            Ring::from_raw(vec![
                Point2::new(0.0, 0.0),
                Point2::new(3.0, 0.0),
                Point2::new(3.0, 3.0),
                Point2::new(2.0, 3.0),
                Point2::new(2.0, 1.0),
                Point2::new(1.0, 1.0),
                Point2::new(1.0, 3.0),
                Point2::new(0.0, 3.0),
            ]),
            Vec::new(),
        );
        let bar = rect(-1.0, 2.0, 4.0, 2.5);
        let inter = run(u, bar, BooleanOp::Intersection);
        assert_eq!(inter.len(), 2);
        assert_relative_eq!(total_area(&inter), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_union_fills_hole() {
        let frame = Polygon::new(
            rect(0.0, 0.0, 4.0, 4.0).exterior().clone(),
            vec![rect(1.0, 1.0, 3.0, 3.0).exterior().clone()],
        );
        let plug = rect(1.0, 1.0, 3.0, 3.0);
        let union = run(frame, plug, BooleanOp::Union);
        assert_eq!(union.len(), 1);
        assert!(union[0].holes().is_empty());
        assert_relative_eq!(union[0].area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_split_pinches() {
        let pieces = split_pinches(vec![0, 1, 2, 3, 4, 2, 5]);
        assert_eq!(pieces, vec![vec![2, 3, 4], vec![0, 1, 2, 5]]);
    }

    #[test]
    fn test_cancel_opposites() {
        let kept = cancel_opposites(vec![(0, 1), (1, 2), (2, 1), (2, 0)]);
        assert_eq!(kept, vec![(0, 1), (2, 0)]);
    }

    #[test]
    fn test_drop_straight_vertices() {
        let pts = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_eq!(drop_straight_vertices(pts, 1e-9).len(), 4);
    }
}
