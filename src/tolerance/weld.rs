//! Incremental vertex welding.

use crate::primitives::Point2;
use num_traits::Float;
use std::collections::HashMap;

/// Assigns stable node ids to points, merging points within `epsilon`.
///
/// The first point inserted for a cluster is kept as its representative, so
/// later insertions never move an existing node. Nodes are bucketed into
/// square cells of side `epsilon`; a lookup only visits the 3x3 block of
/// cells around the query point.
#[derive(Debug, Clone)]
pub struct Welder<F> {
    epsilon: F,
    nodes: Vec<Point2<F>>,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl<F: Float> Welder<F> {
    pub fn new(epsilon: F) -> Self {
        Self {
            epsilon,
            nodes: Vec::new(),
            cells: HashMap::new(),
        }
    }

    /// Returns the id of the node within epsilon of `p`, creating one if needed.
    pub fn insert(&mut self, p: Point2<F>) -> usize {
        if let Some(id) = self.find(p) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(p);
        self.cells.entry(self.cell(p)).or_default().push(id);
        id
    }

    /// Looks up an existing node within epsilon of `p`.
    ///
    /// When several nodes qualify the oldest one wins.
    pub fn find(&self, p: Point2<F>) -> Option<usize> {
        let eps_sq = self.epsilon * self.epsilon;
        let (cx, cy) = self.cell(p);
        let mut best: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                let Some(ids) = self.cells.get(&key) else {
                    continue;
                };
                for &id in ids {
                    if self.nodes[id].distance_squared(p) <= eps_sq
                        && best.map_or(true, |b| id < b)
                    {
                        best = Some(id);
                    }
                }
            }
        }
        best
    }

    /// Representative position of node `id`.
    #[inline]
    pub fn point(&self, id: usize) -> Point2<F> {
        self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // A non-positive epsilon degrades to a single shared cell; lookups stay
    // correct because the distance test is exact.
    fn cell(&self, p: Point2<F>) -> (i64, i64) {
        if self.epsilon <= F::zero() {
            return (0, 0);
        }
        let key = |v: F| (v / self.epsilon).floor().to_i64().unwrap_or(0);
        (key(p.x), key(p.y))
    }
}
