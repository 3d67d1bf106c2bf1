//! The editor state machine.
//!
//! [`EditorState`] owns everything the editor mutates: the committed
//! polygons, the in-progress point sequence, the undo history and the status
//! text. Events are applied one at a time through [`EditorState::handle`];
//! renderers read the result through [`EditorState::view`].

use super::config::EditorConfig;
use super::history::History;
use super::input::{EditorKey, HostKey, InputEvent, Modifiers};
use super::set::{PolygonRecord, PolygonSet};
use super::status::EditorStatus;
use crate::error::{EditError, SetOperation};
use crate::polygon::{BooleanEngine, Polygon};
use crate::primitives::Point2;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Whether a polygon is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Drawing,
}

/// Aggregate editor state.
#[derive(Debug, Clone)]
pub struct EditorState {
    polygons: PolygonSet,
    drawing: Vec<Point2<f64>>,
    history: History,
    status: EditorStatus,
    engine: BooleanEngine<f64>,
    config: EditorConfig,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            polygons: PolygonSet::new(),
            drawing: Vec::new(),
            history: History::with_limit(config.history_limit),
            status: EditorStatus::default(),
            engine: BooleanEngine::new(config.relative_epsilon),
            config,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.drawing.is_empty() {
            Mode::Idle
        } else {
            Mode::Drawing
        }
    }

    pub fn polygons(&self) -> &PolygonSet {
        &self.polygons
    }

    /// Points of the polygon being drawn; empty when idle.
    pub fn in_progress(&self) -> &[Point2<f64>] {
        &self.drawing
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn status(&self) -> &EditorStatus {
        &self.status
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Polygon under `cursor`, or `None` while drawing.
    pub fn hovered(&self, cursor: Point2<f64>) -> Option<usize> {
        match self.mode() {
            Mode::Drawing => None,
            Mode::Idle => self.polygons.hit_test(cursor),
        }
    }

    /// Applies one input event.
    ///
    /// Errors are also recorded as the status error stamped with `now`; the
    /// returned `Err` is informational and the editor stays usable.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Result<(), EditError> {
        self.status.expire(now, self.config.error_display);

        let result = match event {
            InputEvent::PrimaryClick {
                position,
                modifiers,
            } => {
                self.primary_click(position, modifiers);
                Ok(())
            }
            InputEvent::SecondaryClick { .. } => self.close_polygon(),
            InputEvent::KeyPress(key) => self.key_press(key),
        };

        if let Err(err) = &result {
            warn!(%err, "edit rejected");
            self.status.raise(err, now);
        }
        result
    }

    /// Resolves `key` through the configured keymap and handles the result.
    ///
    /// Unbound keys are ignored.
    pub fn handle_host_key(&mut self, key: HostKey, now: Instant) -> Result<(), EditError> {
        match self.config.keymap.event(key) {
            Some(event) => self.handle(event, now),
            None => {
                trace!(?key, "unbound key");
                Ok(())
            }
        }
    }

    fn primary_click(&mut self, position: Point2<f64>, modifiers: Modifiers) {
        if self.mode() == Mode::Drawing {
            self.drawing.push(position);
            return;
        }

        if modifiers.select {
            if let Some(index) = self.polygons.hit_test(position) {
                self.polygons.toggle_selection(index);
                debug!(index, "toggled selection");
                return;
            }
        }

        // Undo history does not survive starting a new drawing.
        self.history.clear();
        self.drawing.push(position);
        debug!(x = position.x, y = position.y, "started polygon");
    }

    fn close_polygon(&mut self) -> Result<(), EditError> {
        if self.mode() == Mode::Idle {
            return Ok(());
        }

        let points = std::mem::take(&mut self.drawing);
        if points.len() <= 2 {
            debug!(points = points.len(), "discarded short polygon");
            return Ok(());
        }

        let polygon = Polygon::from_points(points.clone())?;
        self.polygons.push(PolygonRecord::drawn(polygon, points));
        info!(count = self.polygons.len(), "committed polygon");
        Ok(())
    }

    fn key_press(&mut self, key: EditorKey) -> Result<(), EditError> {
        if self.mode() == Mode::Drawing {
            if key == EditorKey::Cancel {
                self.drawing.clear();
                debug!("cancelled polygon");
            } else {
                debug!(?key, "ignored while drawing");
            }
            return Ok(());
        }

        match key {
            EditorKey::Cancel => Ok(()),
            EditorKey::Delete => {
                self.delete_selected();
                Ok(())
            }
            EditorKey::Union => self.apply(SetOperation::Union),
            EditorKey::Intersection => self.apply(SetOperation::Intersection),
            EditorKey::Difference => self.apply(SetOperation::Difference),
            EditorKey::Clear => {
                self.clear();
                Ok(())
            }
            EditorKey::Undo => {
                self.undo();
                Ok(())
            }
        }
    }

    fn delete_selected(&mut self) {
        if self.polygons.selected_count() > 0 {
            self.history.push(self.polygons.clone());
            let removed = self.polygons.remove_selected();
            info!(removed, "deleted selection");
        }
        self.status.clear_label();
    }

    /// Runs a set operation on the selection. Nothing is snapshotted or
    /// mutated unless the operation succeeds.
    fn apply(&mut self, operation: SetOperation) -> Result<(), EditError> {
        let selected = self.polygons.selected_polygons();
        let outputs = self.engine.apply(operation, &selected)?;

        self.history.push(self.polygons.clone());
        info!(
            %operation,
            inputs = selected.len(),
            outputs = outputs.len(),
            "applied set operation"
        );
        self.polygons.replace_selected(outputs);
        self.status.set_label(operation.label());
        Ok(())
    }

    fn clear(&mut self) {
        if !self.polygons.is_empty() {
            self.history.push(self.polygons.clone());
        }
        self.polygons.clear();
        self.status.set_label("cleared");
    }

    fn undo(&mut self) {
        match self.history.pop() {
            Some(snapshot) => {
                self.polygons = snapshot;
                self.status.set_label("undo last operation");
                debug!(depth = self.history.len(), "undo");
            }
            None => self.status.set_label("nothing to undo"),
        }
    }
}
