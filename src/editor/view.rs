//! Read-only snapshot of what a renderer should draw.

use super::input::Modifiers;
use super::state::{EditorState, Mode};
use crate::polygon::Polygon;
use crate::primitives::Point2;
use std::time::Instant;

/// One committed polygon with its display flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonView<'a> {
    pub polygon: &'a Polygon<f64>,
    pub selected: bool,
    /// The cursor is over this polygon with the select modifier held.
    pub hovered: bool,
}

/// Everything needed to draw one frame.
///
/// Building a view never changes the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderView<'a> {
    /// Committed polygons, bottom to top.
    pub polygons: Vec<PolygonView<'a>>,
    /// Points of the polygon being drawn.
    pub in_progress: &'a [Point2<f64>],
    /// Cursor position, used for the rubber-band segment while drawing.
    pub cursor: Point2<f64>,
    pub status: Option<&'a str>,
    pub error: Option<&'a str>,
    pub drawing_hint: Option<String>,
}

impl EditorState {
    /// Builds the render view for the given cursor and modifier state.
    ///
    /// # Example
    ///
    /// ```
    /// use polyedit::editor::{EditorState, InputEvent, Modifiers};
    /// use polyedit::Point2;
    /// use std::time::Instant;
    ///
    /// let now = Instant::now();
    /// let mut editor = EditorState::default();
    /// let click = |x, y| InputEvent::PrimaryClick {
    ///     position: Point2::new(x, y),
    ///     modifiers: Modifiers::NONE,
    /// };
    /// editor.handle(click(0.0, 0.0), now).unwrap();
    /// editor.handle(click(1.0, 0.0), now).unwrap();
    ///
    /// let view = editor.view(Point2::new(1.0, 1.0), Modifiers::NONE, now);
    /// assert_eq!(view.in_progress.len(), 2);
    /// assert_eq!(
    ///     view.drawing_hint.as_deref(),
    ///     Some("Drawing polygon: 2 points [ESC - cancel]")
    /// );
    /// ```
    pub fn view(&self, cursor: Point2<f64>, modifiers: Modifiers, now: Instant) -> RenderView<'_> {
        let hovered = if modifiers.select {
            self.hovered(cursor)
        } else {
            None
        };

        let polygons = self
            .polygons()
            .iter()
            .enumerate()
            .map(|(index, record)| PolygonView {
                polygon: record.polygon(),
                selected: record.is_selected(),
                hovered: hovered == Some(index),
            })
            .collect();

        let drawing_hint = match self.mode() {
            Mode::Drawing => Some(format!(
                "Drawing polygon: {} points [ESC - cancel]",
                self.in_progress().len()
            )),
            Mode::Idle => None,
        };

        RenderView {
            polygons,
            in_progress: self.in_progress(),
            cursor,
            status: self.status().label(),
            error: self.status().error_at(now, self.config().error_display),
            drawing_hint,
        }
    }
}
