//! Error types for polygon editing operations.

use thiserror::Error;

/// The boolean operations exposed to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetOperation {
    Union,
    Intersection,
    Difference,
}

impl SetOperation {
    /// Lower-case label used in status and error text.
    pub fn label(self) -> &'static str {
        match self {
            SetOperation::Union => "union",
            SetOperation::Intersection => "intersection",
            SetOperation::Difference => "difference",
        }
    }
}

impl std::fmt::Display for SetOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors reported while editing the polygon set.
///
/// Every variant is recoverable: the editor reports it and carries on with
/// its state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A drawn ring failed the simplicity check.
    #[error("Invalid polygon")]
    InvalidPolygon,

    /// Fewer than two polygons were selected for a set operation.
    #[error("At least 2 polygons must be selected for {operation}")]
    InsufficientSelection {
        operation: SetOperation,
        /// Number of polygons that were selected.
        selected: usize,
    },

    /// The operation produced no area.
    #[error("{} is empty", capitalized(.operation))]
    EmptyResult { operation: SetOperation },
}

fn capitalized(operation: &SetOperation) -> String {
    let label = operation.label();
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
