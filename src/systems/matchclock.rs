use bevy_ecs::prelude::*;

use crate::resources::matchclock::MatchClock;
use crate::resources::worldtime::WorldTime;

/// Advance the match clock to the current frame timestamp.
pub fn advance_match_clock(time: Res<WorldTime>, mut clock: ResMut<MatchClock>) {
    clock.advance(time.now);
}
