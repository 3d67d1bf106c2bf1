//! User-facing status label and expiring error message.

use crate::error::EditError;
use std::time::{Duration, Instant};

/// Status shown to the user.
///
/// The label persists until the next action replaces it. The error is
/// stamped with the time it was raised and is only reported while younger
/// than the configured display duration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorStatus {
    label: Option<String>,
    error: Option<ErrorNotice>,
}

#[derive(Debug, Clone, PartialEq)]
struct ErrorNotice {
    message: String,
    raised_at: Instant,
}

impl EditorStatus {
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn clear_label(&mut self) {
        self.label = None;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Replaces any current error with `error`, raised at `now`.
    pub fn raise(&mut self, error: &EditError, now: Instant) {
        self.error = Some(ErrorNotice {
            message: error.to_string(),
            raised_at: now,
        });
    }

    /// The error message if it is still visible at `now`.
    pub fn error_at(&self, now: Instant, display: Duration) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|e| now.saturating_duration_since(e.raised_at) <= display)
            .map(|e| e.message.as_str())
    }

    /// Forgets an error whose display time has run out.
    pub fn expire(&mut self, now: Instant, display: Duration) {
        if self.error_at(now, display).is_none() {
            self.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetOperation;

    #[test]
    fn test_label() {
        let mut status = EditorStatus::default();
        assert_eq!(status.label(), None);
        status.set_label("union");
        assert_eq!(status.label(), Some("union"));
        status.clear_label();
        assert_eq!(status.label(), None);
    }

    #[test]
    fn test_error_expires() {
        let display = Duration::from_millis(3000);
        let t0 = Instant::now();
        let mut status = EditorStatus::default();
        status.raise(
            &EditError::EmptyResult {
                operation: SetOperation::Intersection,
            },
            t0,
        );

        assert_eq!(status.error_at(t0, display), Some("Intersection is empty"));
        assert_eq!(
            status.error_at(t0 + Duration::from_millis(2999), display),
            Some("Intersection is empty")
        );
        assert_eq!(status.error_at(t0 + Duration::from_millis(3001), display), None);

        status.expire(t0 + Duration::from_millis(1000), display);
        assert!(status.error_at(t0, display).is_some());
        status.expire(t0 + Duration::from_secs(4), display);
        assert_eq!(status.error_at(t0, display), None);
    }

    #[test]
    fn test_new_error_restarts_timer() {
        let display = Duration::from_millis(3000);
        let t0 = Instant::now();
        let mut status = EditorStatus::default();
        status.raise(&EditError::InvalidPolygon, t0);
        let t1 = t0 + Duration::from_millis(2500);
        status.raise(&EditError::InvalidPolygon, t1);
        assert!(status.error_at(t0 + Duration::from_millis(4000), display).is_some());
    }
}
