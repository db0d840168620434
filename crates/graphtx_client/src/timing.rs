//! Wall-clock measurement for a single dispatch.

use std::time::Instant;

/// Measures elapsed wall-clock time for one scoped operation.
///
/// One timer per operation; the reading is taken on every exit path of the
/// guarded work, failure included.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts the clock.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock started.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
