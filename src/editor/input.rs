//! Discrete input events and the keymap that produces editor keys.

use crate::primitives::Point2;

/// Modifier state sampled with a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// The selection modifier (Ctrl in the default bindings) is held.
    pub select: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { select: false };
    pub const SELECT: Modifiers = Modifiers { select: true };
}

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditorKey {
    Cancel,
    Delete,
    Union,
    Intersection,
    Difference,
    Clear,
    Undo,
}

/// One user action, fully processed before the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PrimaryClick {
        position: Point2<f64>,
        modifiers: Modifiers,
    },
    SecondaryClick {
        position: Point2<f64>,
    },
    KeyPress(EditorKey),
}

/// A physical key as reported by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostKey {
    Escape,
    Delete,
    Backspace,
    Char(char),
}

/// Maps host keys to editor keys. Character bindings ignore case.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keymap {
    bindings: Vec<(HostKey, EditorKey)>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            bindings: vec![
                (HostKey::Escape, EditorKey::Cancel),
                (HostKey::Delete, EditorKey::Delete),
                (HostKey::Char('u'), EditorKey::Union),
                (HostKey::Char('i'), EditorKey::Intersection),
                (HostKey::Char('d'), EditorKey::Difference),
                (HostKey::Char('c'), EditorKey::Clear),
                (HostKey::Char('r'), EditorKey::Undo),
            ],
        }
    }
}

impl Keymap {
    /// A keymap with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Adds or replaces the binding for `key`.
    pub fn bind(mut self, key: HostKey, command: EditorKey) -> Self {
        let key = normalize(key);
        self.bindings.retain(|(k, _)| normalize(*k) != key);
        self.bindings.push((key, command));
        self
    }

    pub fn resolve(&self, key: HostKey) -> Option<EditorKey> {
        let key = normalize(key);
        self.bindings
            .iter()
            .find(|(k, _)| normalize(*k) == key)
            .map(|&(_, command)| command)
    }

    /// Convenience: translate a host key straight into an input event.
    pub fn event(&self, key: HostKey) -> Option<InputEvent> {
        self.resolve(key).map(InputEvent::KeyPress)
    }
}

fn normalize(key: HostKey) -> HostKey {
    match key {
        HostKey::Char(c) => HostKey::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
