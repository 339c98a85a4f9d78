//! Run conditions for the per-frame continuations.
use bevy_ecs::prelude::*;

use crate::resources::ticker::{FrameLoop, FrameTicker};

pub fn match_clock_scheduled(ticker: Res<FrameTicker>) -> bool {
    ticker.is_scheduled(FrameLoop::MatchClock)
}

pub fn playing_time_scheduled(ticker: Res<FrameTicker>) -> bool {
    ticker.is_scheduled(FrameLoop::PlayingTime)
}
