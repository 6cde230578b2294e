//! Deterministic resize debouncing. Callers feed timestamps in, so tests
//! drive the clock instead of sleeping.

use std::time::{Duration, Instant};

const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

/// Collapses bursts of resize requests into one resize once they settle.
#[derive(Debug)]
pub struct ResizeDebouncer {
    window: Duration,
    pending: Option<Instant>,
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Records a resize request; restarts the settle window.
    pub fn request(&mut self, now: Instant) {
        self.pending = Some(now);
    }

    /// Fires once when the window has elapsed since the last request.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(requested) if now.duration_since(requested) >= self.window => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
