//! Interactive editing on top of the polygon kernel.
//!
//! The editor is a single-threaded state machine driven by discrete
//! [`InputEvent`]s. It keeps an ordered [`PolygonSet`], a point sequence for
//! the polygon being drawn and an undo [`History`] of set snapshots.
//! Rendering is left to the host: [`EditorState::view`] returns everything
//! a frame needs.
//!
//! # Example
//!
//! ```
//! use polyedit::editor::{EditorKey, EditorState, InputEvent, Modifiers};
//! use polyedit::Point2;
//! use std::time::Instant;
//!
//! let now = Instant::now();
//! let mut editor = EditorState::default();
//!
//! for (x, y) in [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)] {
//!     let position = Point2::new(x, y);
//!     editor.handle(InputEvent::PrimaryClick { position, modifiers: Modifiers::NONE }, now)?;
//! }
//! editor.handle(InputEvent::SecondaryClick { position: Point2::new(0.0, 2.0) }, now)?;
//! assert_eq!(editor.polygons().len(), 1);
//!
//! editor.handle(InputEvent::KeyPress(EditorKey::Clear), now)?;
//! assert!(editor.polygons().is_empty());
//! editor.handle(InputEvent::KeyPress(EditorKey::Undo), now)?;
//! assert_eq!(editor.polygons().len(), 1);
//! # Ok::<(), polyedit::EditError>(())
//! ```

mod config;
mod history;
mod input;
mod set;
mod state;
mod status;
mod view;

pub use config::{EditorConfig, DEFAULT_ERROR_DISPLAY};
pub use history::History;
pub use input::{EditorKey, HostKey, InputEvent, Keymap, Modifiers};
pub use set::{PolygonRecord, PolygonSet};
pub use state::{EditorState, Mode};
pub use status::EditorStatus;
pub use view::{PolygonView, RenderView};
