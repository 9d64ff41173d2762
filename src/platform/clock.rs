//! Frame clock
//!
//! The host calls back once per display frame with a monotonic timestamp in
//! milliseconds. The first callback has nothing to diff against and yields no
//! delta.

/// Derives frame deltas from host timestamps
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    /// Longest delta handed to the simulation (ms)
    max_delta_ms: f32,
}

impl FrameClock {
    pub fn new(max_delta_ms: f32) -> Self {
        Self {
            last_ms: None,
            max_delta_ms,
        }
    }

    /// Record a timestamp and return the elapsed time since the previous one.
    ///
    /// Returns 0 on the first frame and when time did not move forward; long
    /// stalls (tab in background, debugger) are capped at `max_delta_ms`.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        if !timestamp_ms.is_finite() {
            return 0.0;
        }
        let Some(last) = self.last_ms.replace(timestamp_ms) else {
            return 0.0;
        };
        let delta = timestamp_ms - last;
        if delta <= 0.0 {
            return 0.0;
        }
        (delta as f32).min(self.max_delta_ms)
    }

    /// Forget the previous timestamp (next frame is treated as the first)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
