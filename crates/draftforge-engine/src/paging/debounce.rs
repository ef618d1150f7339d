//! Re-render debouncing.
//!
//! A burst of edits must trigger one pipeline run, not one per keystroke.
//! The debouncer records a deadline on every edit; the host polls it and
//! starts a render pass once the deadline has passed with no further edits.

use std::time::{Duration, Instant};

/// Deadline-based debouncer for whole-document re-renders.
///
/// Unlike a per-path event debouncer there is only one pending slot here:
/// regeneration is always whole-document, so coalescing collapses every
/// pending edit into "a render is due".
#[derive(Debug)]
pub struct RenderDebouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl RenderDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record an edit. Extends any pending deadline.
    pub fn mark_dirty(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Whether an edit is pending, regardless of deadline.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the pending state if the deadline has passed. Returns true
    /// exactly once per settled edit burst.
    pub fn take_ready(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
