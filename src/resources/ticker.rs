//! Per-frame continuations.
//!
//! The match clock and the playing-time accumulator each run as a repeating
//! per-frame continuation. [`FrameTicker`] records which of them are
//! currently scheduled; the corresponding systems are gated with
//! [`match_clock_scheduled`](crate::systems::ticker::match_clock_scheduled) and
//! [`playing_time_scheduled`](crate::systems::ticker::playing_time_scheduled).
//! Tearing the session down cancels everything and no further frame runs.

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameLoop {
    MatchClock,
    PlayingTime,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct FrameTicker {
    scheduled: FxHashSet<FrameLoop>,
    torn_down: bool,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `frame_loop` to run every frame. Ignored after teardown.
    pub fn start(&mut self, frame_loop: FrameLoop) {
        if self.torn_down {
            debug!("Ticker torn down, not scheduling {:?}", frame_loop);
            return;
        }
        self.scheduled.insert(frame_loop);
    }

    pub fn cancel(&mut self, frame_loop: FrameLoop) {
        self.scheduled.remove(&frame_loop);
    }

    pub fn is_scheduled(&self, frame_loop: FrameLoop) -> bool {
        self.scheduled.contains(&frame_loop)
    }

    /// True when no continuation is pending.
    pub fn is_idle(&self) -> bool {
        self.scheduled.is_empty()
    }

    /// Cancel every continuation for good.
    pub fn teardown(&mut self) {
        self.scheduled.clear();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
