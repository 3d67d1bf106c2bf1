//! polyedit - Interactive polygon editing with boolean set operations
//!
//! The crate is split into a geometry kernel and an editor built on top of it:
//!
//! - [`primitives`]: points, vectors and segments.
//! - [`tolerance`]: epsilon-aware predicates and the tolerance policy.
//! - [`polygon`]: rings, polygons with holes, validation and the boolean
//!   overlay engine.
//! - [`editor`]: the editing state machine, undo history and render view.
//!
//! Rendering and windowing belong to the host application, which feeds
//! [`editor::InputEvent`]s in and draws the [`editor::RenderView`] it gets
//! back.

pub mod editor;
pub mod error;
pub mod polygon;
pub mod primitives;
pub mod tolerance;

pub use editor::{EditorConfig, EditorState};
pub use error::{EditError, SetOperation};
pub use primitives::{Point2, Segment2, Vec2};
pub use tolerance::{
    orient2d, point_on_segment, segments_intersect, Orientation, SegmentIntersection, Tolerance,
};
