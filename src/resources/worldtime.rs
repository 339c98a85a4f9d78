use bevy_ecs::prelude::Resource;

/// Timestamp (seconds) handed to the current frame.
///
/// The clock and accumulator keep their own reference timestamps and only
/// read `now`.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldTime {
    pub now: f64,
}
