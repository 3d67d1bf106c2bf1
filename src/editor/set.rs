//! The committed polygons and their selection flags.

use crate::polygon::Polygon;
use crate::primitives::Point2;

/// A committed polygon plus its editor bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRecord {
    polygon: Polygon<f64>,
    selected: bool,
    /// The points as the user clicked them; empty for operation outputs.
    original_points: Vec<Point2<f64>>,
}

impl PolygonRecord {
    /// A record for a polygon the user drew.
    pub fn drawn(polygon: Polygon<f64>, original_points: Vec<Point2<f64>>) -> Self {
        Self {
            polygon,
            selected: false,
            original_points,
        }
    }

    /// A record for a boolean-operation output.
    pub fn generated(polygon: Polygon<f64>) -> Self {
        Self {
            polygon,
            selected: false,
            original_points: Vec::new(),
        }
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[inline]
    pub fn original_points(&self) -> &[Point2<f64>] {
        &self.original_points
    }
}

/// Insertion-ordered polygon collection.
///
/// Later records sit on top of earlier ones: when polygons overlap,
/// [`hit_test`](Self::hit_test) reports the most recently inserted one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSet {
    records: Vec<PolygonRecord>,
}

impl PolygonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PolygonRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolygonRecord> {
        self.records.iter()
    }

    pub fn push(&mut self, record: PolygonRecord) {
        self.records.push(record);
    }

    /// Index of the topmost polygon containing `point`.
    pub fn hit_test(&self, point: Point2<f64>) -> Option<usize> {
        self.records
            .iter()
            .rposition(|r| r.polygon.contains(point))
    }

    /// Flips the selection flag of `index`; out-of-range indices are ignored.
    pub fn toggle_selection(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.selected = !record.selected;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.records.iter().filter(|r| r.selected).count()
    }

    /// Copies of the selected polygons, in insertion order.
    pub fn selected_polygons(&self) -> Vec<Polygon<f64>> {
        self.records
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.polygon.clone())
            .collect()
    }

    /// Removes every selected record and returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.selected);
        before - self.records.len()
    }

    /// Replaces the selected records with unselected operation outputs
    /// appended at the top.
    pub fn replace_selected(&mut self, outputs: Vec<Polygon<f64>>) {
        self.remove_selected();
        self.records
            .extend(outputs.into_iter().map(PolygonRecord::generated));
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
