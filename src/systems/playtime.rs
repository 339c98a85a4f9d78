//! Playing-time accumulation system.
//!
//! Runs after [`advance_match_clock`](crate::systems::matchclock::advance_match_clock)
//! so it always sees the clock state of the current frame. Elapsed time is
//! gathered in the [`PlayTimeAccumulator`] and, once a batch is due, added to
//! every on-field player in a single roster update.

use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::matchclock::MatchClock;
use crate::resources::playtime::PlayTimeAccumulator;
use crate::resources::roster::Roster;
use crate::resources::worldtime::WorldTime;

pub fn accumulate_playing_time(
    time: Res<WorldTime>,
    clock: Res<MatchClock>,
    mut accumulator: ResMut<PlayTimeAccumulator>,
    mut roster: ResMut<Roster>,
) {
    let Some(increment) = accumulator.tick(time.now, clock.is_running()) else {
        return;
    };
    roster.update_where(|p| p.is_on_field, |p| p.playing_time += increment);
    trace!(
        "Credited {:.3}s to {} on-field players",
        increment,
        roster.on_field_count()
    );
}
