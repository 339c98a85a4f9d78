//! Board session context.
//!
//! [`Board`] owns the ECS [`World`] holding all session state (roster, match
//! clock, accumulator, field geometry, drag controller, store) and the update
//! [`Schedule`] that runs once per frame. Nothing lives in statics: callers
//! drive the session by feeding frame timestamps to [`Board::run_frame`] and
//! by emitting events (drag gestures, clock commands, viewport changes)
//! through the helper methods below.
//!
//! # Frame order
//!
//! 1. `migrate_legacy_positions` (once, when the field is first measured)
//! 2. `advance_match_clock` (while its continuation is scheduled)
//! 3. `accumulate_playing_time` (after the clock, so it sees this frame's state)
//! 4. `persist_roster` (if anything changed)

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::boxcollider::BoxCollider;
use crate::components::dropzone::{DropZone, ZoneKind};
use crate::components::mapposition::MapPosition;
use crate::events::drag::{DragEndEvent, DragStartEvent};
use crate::events::matchcontrol::{MatchCommand, MatchControlEvent, match_control_observer};
use crate::events::viewport::{ViewportResizedEvent, viewport_resized_observer};
use crate::math::Vec2;
use crate::resources::boardconfig::BoardConfig;
use crate::resources::drag::{DragController, DragOutcome};
use crate::resources::fieldgeometry::FieldGeometry;
use crate::resources::kvstore::{BoardStore, KeyValueStore, MemoryStore, StoreError};
use crate::resources::matchclock::MatchClock;
use crate::resources::playtime::PlayTimeAccumulator;
use crate::resources::roster::Roster;
use crate::resources::ticker::FrameTicker;
use crate::resources::worldtime::WorldTime;
use crate::systems::drag::{announce_drag_outcome, drag_end_observer, drag_start_observer};
use crate::systems::matchclock::advance_match_clock;
use crate::systems::migration::migrate_legacy_positions;
use crate::systems::persistence::persist_roster;
use crate::systems::playtime::accumulate_playing_time;
use crate::systems::ticker::{match_clock_scheduled, playing_time_scheduled};
use crate::systems::time::{FrameSource, update_world_time};

/// Stacking order of the drop zones; only matters for overlapping layouts.
const FIELD_ZONE_ORDER: i32 = 0;
const BENCH_ZONE_ORDER: i32 = 1;

pub struct Board {
    world: World,
    update: Schedule,
}

impl Board {
    /// Build a session, loading the roster from `store`.
    pub fn new(config: BoardConfig, store: impl KeyValueStore + 'static) -> Self {
        let roster = Roster::load(&store);
        info!(
            "Board loaded: {} players, {} formations",
            roster.players().len(),
            roster.formations().len()
        );

        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(FrameTicker::new());
        world.insert_resource(MatchClock::new());
        world.insert_resource(PlayTimeAccumulator::with_threshold(config.batch_seconds));
        world.insert_resource(FieldGeometry::unmeasured(config.dot_size));
        world.insert_resource(DragController::new(config.grid()));
        world.insert_resource(roster);
        world.insert_resource(BoardStore::new(store));
        world.insert_resource(config);

        // Zones start empty and are laid out on the first viewport event
        world.spawn((
            DropZone::new(ZoneKind::Field, FIELD_ZONE_ORDER),
            MapPosition::new(0.0, 0.0),
            BoxCollider::new(0.0, 0.0),
        ));
        world.spawn((
            DropZone::new(ZoneKind::Bench, BENCH_ZONE_ORDER),
            MapPosition::new(0.0, 0.0),
            BoxCollider::new(0.0, 0.0),
        ));

        world.add_observer(match_control_observer);
        world.add_observer(viewport_resized_observer);
        world.add_observer(drag_start_observer);
        world.add_observer(drag_end_observer);
        world.add_observer(announce_drag_outcome);
        // Ensure the observers are registered before anything triggers events.
        world.flush();

        let mut update = Schedule::default();
        update.add_systems(migrate_legacy_positions);
        update.add_systems(advance_match_clock.run_if(match_clock_scheduled));
        update.add_systems(
            accumulate_playing_time
                .run_if(playing_time_scheduled)
                .after(advance_match_clock),
        );
        update.add_systems(
            persist_roster
                .after(accumulate_playing_time)
                .after(migrate_legacy_positions),
        );

        Board { world, update }
    }

    /// Session backed by an in-memory store and default configuration.
    pub fn in_memory() -> Self {
        Board::new(BoardConfig::new(), MemoryStore::new())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &BoardConfig {
        self.world.resource::<BoardConfig>()
    }

    pub fn roster(&self) -> &Roster {
        self.world.resource::<Roster>()
    }

    pub fn roster_mut(&mut self) -> Mut<'_, Roster> {
        self.world.resource_mut::<Roster>()
    }

    pub fn clock(&self) -> &MatchClock {
        self.world.resource::<MatchClock>()
    }

    pub fn accumulator(&self) -> &PlayTimeAccumulator {
        self.world.resource::<PlayTimeAccumulator>()
    }

    pub fn geometry(&self) -> &FieldGeometry {
        self.world.resource::<FieldGeometry>()
    }

    pub fn drag(&self) -> &DragController {
        self.world.resource::<DragController>()
    }

    pub fn ticker(&self) -> &FrameTicker {
        self.world.resource::<FrameTicker>()
    }

    // --------------- Frames ---------------

    /// Run one frame at `timestamp` seconds. Returns `false` once the session
    /// has been torn down.
    pub fn run_frame(&mut self, timestamp: f64) -> bool {
        if self.ticker().is_torn_down() {
            return false;
        }
        update_world_time(&mut self.world, timestamp);
        self.update.run(&mut self.world);
        self.world.clear_trackers();
        true
    }

    /// Run `frames` frames pulled from `source`.
    pub fn run_frames(&mut self, source: &mut impl FrameSource, frames: usize) {
        for _ in 0..frames {
            if !self.run_frame(source.next_timestamp()) {
                break;
            }
        }
    }

    /// Run frames from `source` until its timestamps pass `until` seconds.
    pub fn run_until(&mut self, source: &mut impl FrameSource, until: f64) {
        loop {
            let ts = source.next_timestamp();
            if ts > until || !self.run_frame(ts) {
                break;
            }
        }
    }

    /// Cancel every per-frame continuation, abandon any gesture and flush
    /// unsaved roster changes. No frame runs afterwards.
    pub fn teardown(&mut self) {
        self.world.resource_mut::<FrameTicker>().teardown();
        self.world.resource_mut::<DragController>().cancel();
        if let Err(e) = self.persist() {
            warn!("Failed to persist roster on teardown: {}", e);
        }
        info!("Board session torn down");
    }

    /// Write unsaved roster changes to the store now. Untouched records are
    /// not rewritten. Returns how many keys were written.
    pub fn persist(&mut self) -> Result<usize, StoreError> {
        if !self.roster().is_dirty() {
            return Ok(0);
        }
        self.world
            .resource_scope(|world, mut store: Mut<BoardStore>| -> Result<usize, StoreError> {
                world
                    .resource_mut::<Roster>()
                    .save_changes(store.0.as_mut())
            })
    }

    // --------------- Match clock ---------------

    pub fn control(&mut self, command: MatchCommand) {
        self.world.trigger(MatchControlEvent::new(command));
        self.world.flush();
    }

    pub fn start_match(&mut self, minutes: f64) {
        self.control(MatchCommand::Start(minutes));
    }

    pub fn stop_match(&mut self) {
        self.control(MatchCommand::Stop);
    }

    pub fn pause_match(&mut self) {
        self.control(MatchCommand::Pause);
    }

    pub fn resume_match(&mut self) {
        self.control(MatchCommand::Resume);
    }

    pub fn add_time(&mut self, seconds: f64) {
        self.control(MatchCommand::AddTime(seconds));
    }

    // --------------- Layout ---------------

    /// Refit the field and bench to a new viewport size.
    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.world.trigger(ViewportResizedEvent { width, height });
        self.world.flush();
    }

    /// Set the measured field surface directly (layouts computed elsewhere).
    pub fn set_field_surface(&mut self, origin: Vec2, width: f64, height: f64) {
        self.world
            .resource_mut::<FieldGeometry>()
            .set_surface(origin, width, height);
        self.place_zone(ZoneKind::Field, origin, Vec2::new(width, height));
    }

    pub fn set_bench_zone(&mut self, origin: Vec2, size: Vec2) {
        self.place_zone(ZoneKind::Bench, origin, size);
    }

    /// Current origin and size of a drop zone.
    pub fn zone_rect(&mut self, kind: ZoneKind) -> Option<(Vec2, Vec2)> {
        let mut zones = self
            .world
            .query::<(&DropZone, &MapPosition, &BoxCollider)>();
        zones
            .iter(&self.world)
            .find(|(zone, _, _)| zone.kind == kind)
            .map(|(_, position, collider)| (position.pos, collider.size))
    }

    fn place_zone(&mut self, kind: ZoneKind, origin: Vec2, size: Vec2) {
        let mut zones = self
            .world
            .query::<(&DropZone, &mut MapPosition, &mut BoxCollider)>();
        for (zone, mut position, mut collider) in zones.iter_mut(&mut self.world) {
            if zone.kind == kind {
                position.pos = origin;
                *collider = BoxCollider::new(size.x, size.y);
            }
        }
    }

    // --------------- Drag ---------------

    /// Pick up a player's token. Returns `false` if the player is unknown.
    pub fn begin_drag(&mut self, player_id: &str) -> bool {
        self.world.trigger(DragStartEvent {
            player_id: player_id.to_string(),
        });
        self.world.flush();
        self.drag().active_player() == Some(player_id)
    }

    /// Release the dragged token with its top-left corner at `token_pos`
    /// after the pointer moved by `delta`. The token is one dot in size.
    pub fn end_drag(&mut self, token_pos: Vec2, delta: Vec2) -> DragOutcome {
        let dot = self.geometry().dot_size;
        self.end_drag_with(DragEndEvent {
            token_pos,
            token_size: Vec2::new(dot, dot),
            delta,
        })
    }

    pub fn end_drag_with(&mut self, event: DragEndEvent) -> DragOutcome {
        self.world.trigger(event);
        self.world.flush();
        self.drag().last_outcome().unwrap_or(DragOutcome::Ignored)
    }
}
