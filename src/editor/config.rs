//! Editor configuration.

use super::input::Keymap;
use crate::tolerance::DEFAULT_RELATIVE_EPSILON;
use std::time::Duration;

/// How long an error message stays visible.
pub const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_millis(3000);

/// Tunables for [`EditorState`](super::EditorState).
///
/// # Example
///
/// ```
/// use polyedit::editor::EditorConfig;
/// use std::time::Duration;
///
/// let config = EditorConfig::default()
///     .with_error_display(Duration::from_secs(5))
///     .with_history_limit(Some(50));
/// assert_eq!(config.error_display, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Time an error message stays visible after it is raised.
    pub error_display: Duration,
    /// Boolean-engine tolerance relative to the extent of the selection.
    pub relative_epsilon: f64,
    /// Maximum number of undo snapshots; `None` keeps all of them.
    pub history_limit: Option<usize>,
    /// Host key bindings used by [`EditorState::handle_host_key`](super::EditorState::handle_host_key).
    pub keymap: Keymap,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            error_display: DEFAULT_ERROR_DISPLAY,
            relative_epsilon: DEFAULT_RELATIVE_EPSILON,
            history_limit: None,
            keymap: Keymap::default(),
        }
    }
}

impl EditorConfig {
    pub fn with_error_display(mut self, error_display: Duration) -> Self {
        self.error_display = error_display;
        self
    }

    pub fn with_relative_epsilon(mut self, relative_epsilon: f64) -> Self {
        self.relative_epsilon = relative_epsilon;
        self
    }

    pub fn with_history_limit(mut self, history_limit: Option<usize>) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }
}
