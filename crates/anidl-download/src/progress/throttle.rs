//! Progress throttling.
//!
//! Chunks arrive far more often than a terminal can usefully redraw, so the
//! consumer asks the throttle before forwarding each update.

use std::time::{Duration, Instant};

use anidl_core::DownloadProgress;

/// Rate-limiter for per-episode progress updates.
///
/// The first update and the completing update always pass; everything in
/// between is limited to one per interval.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressThrottle {
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_emit: None,
            min_interval,
        }
    }

    /// Whether `progress` should be forwarded now.
    pub fn should_emit(&mut self, progress: DownloadProgress) -> bool {
        self.should_emit_at(progress, Instant::now())
    }

    fn should_emit_at(&mut self, progress: DownloadProgress, now: Instant) -> bool {
        let due = match self.last_emit {
            Some(last) => now.duration_since(last) >= self.min_interval,
            None => true,
        };
        if due || progress.is_complete() {
            self.last_emit = Some(now);
            return true;
        }
        false
    }

    /// Forget the last emit; the next update passes. Called between episodes.
    pub const fn reset(&mut self) {
        self.last_emit = None;
    }
}
