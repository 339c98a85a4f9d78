//! Match clock commands and their observer.
//!
//! Every user-facing clock action (start, stop, pause, resume, added time)
//! is a [`MatchControlEvent`]. The observer applies it to the
//! [`MatchClock`] and keeps the per-frame continuations in [`FrameTicker`]
//! in step: starting schedules the clock and playing-time loops, stopping
//! cancels them.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::matchclock::MatchClock;
use crate::resources::playtime::PlayTimeAccumulator;
use crate::resources::ticker::{FrameLoop, FrameTicker};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchCommand {
    /// Start a fresh match of the given length in minutes.
    Start(f64),
    Stop,
    Pause,
    Resume,
    /// Extend the match by this many seconds.
    AddTime(f64),
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MatchControlEvent {
    pub command: MatchCommand,
}

impl MatchControlEvent {
    pub fn new(command: MatchCommand) -> Self {
        MatchControlEvent { command }
    }
}

/// Observer that applies a [`MatchControlEvent`].
pub fn match_control_observer(
    trigger: On<MatchControlEvent>,
    mut clock: ResMut<MatchClock>,
    mut accumulator: ResMut<PlayTimeAccumulator>,
    mut ticker: ResMut<FrameTicker>,
) {
    let command = trigger.event().command;
    debug!("MatchControlEvent {:?}", command);
    match command {
        MatchCommand::Start(minutes) => {
            clock.start(minutes);
            accumulator.reset();
            ticker.start(FrameLoop::MatchClock);
            ticker.start(FrameLoop::PlayingTime);
        }
        MatchCommand::Stop => {
            clock.stop();
            accumulator.reset();
            ticker.cancel(FrameLoop::MatchClock);
            ticker.cancel(FrameLoop::PlayingTime);
        }
        MatchCommand::Pause => clock.pause(),
        MatchCommand::Resume => clock.resume(),
        MatchCommand::AddTime(seconds) => clock.add_time(seconds),
    }
}
