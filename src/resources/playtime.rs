//! Playing-time accumulator resource.
//!
//! Collects elapsed match time locally each frame and only credits it to the
//! on-field players once `threshold` seconds have built up, turning a
//! per-frame mutation of the roster into a few batches per second.

use bevy_ecs::prelude::Resource;

/// Seconds of accumulated time that trigger a flush.
pub const DEFAULT_BATCH_SECONDS: f64 = 0.25;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayTimeAccumulator {
    pub threshold: f64,
    accumulated: f64,
    last_timestamp: Option<f64>,
    flush_count: u64,
}

impl Default for PlayTimeAccumulator {
    fn default() -> Self {
        PlayTimeAccumulator::with_threshold(DEFAULT_BATCH_SECONDS)
    }
}

impl PlayTimeAccumulator {
    pub fn with_threshold(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() && threshold > 0.0 {
            threshold
        } else {
            DEFAULT_BATCH_SECONDS
        };
        PlayTimeAccumulator {
            threshold,
            accumulated: 0.0,
            last_timestamp: None,
            flush_count: 0,
        }
    }

    /// Time gathered but not yet credited.
    pub fn pending(&self) -> f64 {
        self.accumulated
    }

    /// Number of batches applied so far.
    pub fn flush_count(&self) -> u64 {
        self.flush_count
    }

    /// Forget the reference timestamp and any pending time.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
        self.last_timestamp = None;
    }

    /// Feed one frame. `running` is the clock's active-and-unpaused state.
    ///
    /// Returns the amount to credit when a batch is due; the accumulator is
    /// zeroed at that point.
    pub fn tick(&mut self, now: f64, running: bool) -> Option<f64> {
        let last = self.last_timestamp.unwrap_or(now);
        let delta = (now - last).max(0.0);
        self.last_timestamp = Some(now);

        if !running {
            return None;
        }
        self.accumulated += delta;
        if self.accumulated < self.threshold {
            return None;
        }
        let increment = self.accumulated;
        self.accumulated = 0.0;
        self.flush_count += 1;
        Some(increment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flushes_once_threshold_is_reached() {
        let mut acc = PlayTimeAccumulator::default();
        assert_eq!(acc.tick(0.0, true), None);
        assert_eq!(acc.tick(0.125, true), None);
        assert_eq!(acc.tick(0.25, true), Some(0.25));
        assert_eq!(acc.pending(), 0.0);
        assert_eq!(acc.flush_count(), 1);
    }

    #[test]
    fn paused_frames_do_not_accrue() {
        let mut acc = PlayTimeAccumulator::default();
        acc.tick(0.0, true);
        acc.tick(0.125, true);
        assert_eq!(acc.tick(10.0, false), None);
        assert_eq!(acc.pending(), 0.125);
        assert_eq!(acc.tick(10.125, true), Some(0.25));
    }
}
