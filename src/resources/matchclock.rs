//! Match clock resource.
//!
//! A free-running game clock with three states: stopped, running and paused.
//! It is advanced once per frame by
//! [`advance_match_clock`](crate::systems::matchclock::advance_match_clock)
//! with the frame timestamp, and accrues the wall-clock time elapsed since the
//! previous frame only while running. `current_time` is clamped at
//! `game_duration`; the duration itself only ever grows at runtime (added
//! time).

use bevy_ecs::prelude::Resource;
use log::{debug, info};

/// Match length used when `start` is given no usable duration.
pub const DEFAULT_MATCH_MINUTES: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MatchClock {
    is_active: bool,
    is_paused: bool,
    game_duration: f64,
    current_time: f64,
    last_timestamp: Option<f64>,
}

impl Default for MatchClock {
    fn default() -> Self {
        MatchClock {
            is_active: false,
            is_paused: false,
            game_duration: DEFAULT_MATCH_MINUTES * 60.0,
            current_time: 0.0,
            last_timestamp: None,
        }
    }
}

impl MatchClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Active and not paused: the only state in which time accrues.
    pub fn is_running(&self) -> bool {
        self.is_active && !self.is_paused
    }

    pub fn state(&self) -> ClockState {
        match (self.is_active, self.is_paused) {
            (false, _) => ClockState::Stopped,
            (true, false) => ClockState::Running,
            (true, true) => ClockState::Paused,
        }
    }

    pub fn game_duration(&self) -> f64 {
        self.game_duration
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Whole seconds left until `game_duration`, never negative.
    pub fn remaining(&self) -> f64 {
        (self.game_duration - self.current_time).floor().max(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.is_active && self.current_time >= self.game_duration
    }

    /// Start a fresh match of `minutes` (90 when zero, negative or not finite).
    pub fn start(&mut self, minutes: f64) {
        let minutes = if minutes.is_finite() && minutes > 0.0 {
            minutes
        } else {
            DEFAULT_MATCH_MINUTES
        };
        self.game_duration = minutes * 60.0;
        self.current_time = 0.0;
        self.is_paused = false;
        self.is_active = true;
        self.last_timestamp = None;
        info!("Match started: {} minutes", minutes);
    }

    /// Stop and discard elapsed time.
    pub fn stop(&mut self) {
        self.is_active = false;
        self.is_paused = false;
        self.current_time = 0.0;
        info!("Match stopped");
    }

    pub fn pause(&mut self) {
        if !self.is_active {
            debug!("Ignoring pause on a stopped clock");
            return;
        }
        self.is_paused = true;
    }

    pub fn resume(&mut self) {
        if !self.is_active {
            debug!("Ignoring resume on a stopped clock");
            return;
        }
        self.is_paused = false;
    }

    /// Extend the match. Does not touch `current_time` or restart a stopped clock.
    pub fn add_time(&mut self, seconds: f64) {
        if !seconds.is_finite() || seconds <= 0.0 {
            debug!("Ignoring add_time({})", seconds);
            return;
        }
        self.game_duration += seconds;
        info!("Added {} s, match now {} s", seconds, self.game_duration);
    }

    /// Advance to frame timestamp `now` (seconds).
    ///
    /// While stopped or paused only the reference timestamp moves, so resuming
    /// never produces a jump. The first frame after a start only sets the
    /// reference.
    pub fn advance(&mut self, now: f64) {
        if !self.is_running() {
            self.last_timestamp = Some(now);
            return;
        }
        let last = self.last_timestamp.unwrap_or(now);
        let delta = (now - last).max(0.0);
        self.last_timestamp = Some(now);
        self.current_time = (self.current_time + delta).min(self.game_duration);
    }
}
