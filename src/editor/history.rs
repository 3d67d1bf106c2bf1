//! Undo history: snapshots of the polygon set taken before each mutation.

use super::set::PolygonSet;
use tracing::trace;

/// LIFO stack of [`PolygonSet`] snapshots.
///
/// Snapshots are deep copies, so later edits never reach into the history.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<PolygonSet>,
    limit: Option<usize>,
}

impl History {
    /// Creates a history that keeps at most `limit` snapshots, dropping the
    /// oldest first. `None` keeps everything.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            snapshots: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, snapshot: PolygonSet) {
        self.snapshots.push(snapshot);
        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
            }
        }
        trace!(depth = self.snapshots.len(), "history push");
    }

    pub fn pop(&mut self) -> Option<PolygonSet> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
