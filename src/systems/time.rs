//! Frame timing.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame from the frame's timestamp, and provides the
//! [`FrameSource`] implementations that produce those timestamps: real wall
//! clock time for live sessions, synthetic fixed steps for simulation and
//! tests.
use std::thread;
use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Record the timestamp (seconds) of a new frame on the `WorldTime` resource.
pub fn update_world_time(world: &mut World, timestamp: f64) {
    world.resource_mut::<WorldTime>().now = timestamp;
}

/// Something that hands out one timestamp per frame, in seconds.
pub trait FrameSource {
    fn next_timestamp(&mut self) -> f64;
}

/// Synthetic frames spaced `step` seconds apart, starting at `start`.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedFrames {
    next: f64,
    step: f64,
}

impl SimulatedFrames {
    pub fn new(start: f64, step: f64) -> Self {
        SimulatedFrames {
            next: start,
            step: step.max(0.0),
        }
    }

    /// Frames at a fixed rate starting from zero.
    pub fn at_fps(fps: f64) -> Self {
        let step = if fps > 0.0 { 1.0 / fps } else { 0.0 };
        SimulatedFrames::new(0.0, step)
    }
}

impl FrameSource for SimulatedFrames {
    fn next_timestamp(&mut self) -> f64 {
        let ts = self.next;
        self.next += self.step;
        ts
    }
}

/// Seconds elapsed since the source was created.
///
/// A paced source blocks in [`FrameSource::next_timestamp`] until the next
/// frame slot, standing in for a display's refresh callback. Slots that were
/// already missed are handed out immediately.
#[derive(Debug, Clone, Copy)]
pub struct WallClockFrames {
    started: Instant,
    frame: Option<Duration>,
    next_slot: Duration,
}

impl Default for WallClockFrames {
    fn default() -> Self {
        WallClockFrames {
            started: Instant::now(),
            frame: None,
            next_slot: Duration::ZERO,
        }
    }
}

impl WallClockFrames {
    /// Wall clock frames at most `fps` times a second. A non-positive or
    /// non-finite rate leaves the source unpaced.
    pub fn paced(fps: f64) -> Self {
        let frame = (fps.is_finite() && fps > 0.0)
            .then(|| Duration::try_from_secs_f64(1.0 / fps).ok())
            .flatten();
        WallClockFrames {
            frame,
            ..Default::default()
        }
    }
}

impl FrameSource for WallClockFrames {
    fn next_timestamp(&mut self) -> f64 {
        if let Some(frame) = self.frame {
            let elapsed = self.started.elapsed();
            if elapsed < self.next_slot {
                thread::sleep(self.next_slot - elapsed);
            }
            self.next_slot += frame;
        }
        self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_frames_step_from_start() {
        let mut frames = SimulatedFrames::new(2.0, 0.5);
        let stamps: Vec<f64> = (0..3).map(|_| frames.next_timestamp()).collect();
        assert_eq!(stamps, vec![2.0, 2.5, 3.0]);
    }

    #[test]
    fn paced_wall_clock_waits_for_each_slot() {
        // 200 fps: the third frame cannot come before 10 ms
        let mut frames = WallClockFrames::paced(200.0);
        let first = frames.next_timestamp();
        let second = frames.next_timestamp();
        let third = frames.next_timestamp();
        assert!(first <= second && second <= third);
        assert!(third >= 0.010);
    }

    #[test]
    fn unusable_rate_leaves_wall_clock_unpaced() {
        assert!(WallClockFrames::paced(0.0).frame.is_none());
        assert!(WallClockFrames::paced(f64::NAN).frame.is_none());
    }
}
