//! Drag interaction controller.
//!
//! Tracks at most one in-progress drag gesture and, when it ends, turns the
//! gesture into a single roster update:
//!
//! | origin | drop zone | effect                                            |
//! |--------|-----------|---------------------------------------------------|
//! | bench  | field     | placed on field at the pointer (token centered)   |
//! | field  | bench     | taken off the field, position left as-is          |
//! | field  | field     | moved by the gesture delta                        |
//! | any    | none      | gesture discarded                                 |
//!
//! Every other combination is ignored. Pixel positions are clamped into the
//! active play area and normalized with the current
//! [`FieldGeometry`](crate::resources::fieldgeometry::FieldGeometry).

use bevy_ecs::prelude::Resource;
use log::debug;

use crate::components::dropzone::ZoneKind;
use crate::math::Vec2;
use crate::resources::fieldgeometry::{FieldGeometry, snap_to_grid};
use crate::resources::roster::{Player, Roster};

/// Where the dragged token was picked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOrigin {
    Bench,
    /// Token pixel position (relative to the field origin) at pick-up.
    Field { start: Vec2 },
}

impl DragOrigin {
    pub fn zone(&self) -> ZoneKind {
        match self {
            DragOrigin::Bench => ZoneKind::Bench,
            DragOrigin::Field { .. } => ZoneKind::Field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        player_id: String,
        origin: DragOrigin,
    },
}

/// Result of ending a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Released outside every drop zone.
    Discarded,
    /// Bench to field; carries the new normalized position.
    PlacedOnField(Vec2),
    /// Field to bench.
    Benched,
    /// Field to field; carries the new normalized position.
    Moved(Vec2),
    /// No gesture in progress, unknown player or unsupported combination.
    Ignored,
}

impl DragOutcome {
    pub fn is_commit(&self) -> bool {
        matches!(
            self,
            DragOutcome::PlacedOnField(_) | DragOutcome::Benched | DragOutcome::Moved(_)
        )
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    /// `(cols, rows)` when drops snap to a grid.
    pub grid: Option<(u32, u32)>,
    last_outcome: Option<DragOutcome>,
}

impl DragController {
    pub fn new(grid: Option<(u32, u32)>) -> Self {
        DragController {
            grid,
            ..Default::default()
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Id of the player currently being dragged.
    pub fn active_player(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { player_id, .. } => Some(player_id),
            DragState::Idle => None,
        }
    }

    pub fn last_outcome(&self) -> Option<DragOutcome> {
        self.last_outcome
    }

    /// Drop any gesture in progress without touching the roster.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Pick up `player_id` from wherever it currently is.
    ///
    /// A gesture already in progress is abandoned first. Returns `false` for
    /// an unknown player.
    pub fn begin_drag(&mut self, roster: &Roster, geometry: &FieldGeometry, player_id: &str) -> bool {
        self.cancel();
        let Some(player) = roster.player(player_id) else {
            debug!("begin_drag: unknown player {}", player_id);
            return false;
        };
        let origin = if player.is_on_field {
            DragOrigin::Field {
                start: geometry.to_pixel(player.normalized()),
            }
        } else {
            DragOrigin::Bench
        };
        debug!("Dragging {} from {:?}", player_id, origin.zone());
        self.state = DragState::Dragging {
            player_id: player_id.to_string(),
            origin,
        };
        true
    }

    /// Finish the gesture and commit it to `roster`.
    ///
    /// `target` is the zone under the token at release, `delta` the pointer's
    /// total movement and `drop_center` the token's center in the same space
    /// as `geometry.origin`. The controller is idle afterwards.
    pub fn end_drag(
        &mut self,
        roster: &mut Roster,
        geometry: &FieldGeometry,
        target: Option<ZoneKind>,
        delta: Vec2,
        drop_center: Vec2,
    ) -> DragOutcome {
        let outcome = match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Dragging { player_id, origin } => {
                if roster.player(&player_id).is_none() {
                    DragOutcome::Ignored
                } else {
                    self.commit(roster, geometry, &player_id, origin, target, delta, drop_center)
                }
            }
        };
        debug!("Drag ended: {:?}", outcome);
        self.last_outcome = Some(outcome);
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    fn commit(
        &self,
        roster: &mut Roster,
        geometry: &FieldGeometry,
        player_id: &str,
        origin: DragOrigin,
        target: Option<ZoneKind>,
        delta: Vec2,
        drop_center: Vec2,
    ) -> DragOutcome {
        let is_target = |p: &Player| p.id == player_id;
        match (origin, target) {
            (_, None) => DragOutcome::Discarded,
            (DragOrigin::Bench, Some(ZoneKind::Field)) => {
                let half_dot = geometry.dot_size / 2.0;
                let pixel = drop_center - geometry.origin - Vec2::new(half_dot, half_dot);
                let normalized = self.place(geometry, pixel);
                roster.update_where(is_target, |p| {
                    p.is_on_field = true;
                    p.field_pct = Some(normalized);
                });
                DragOutcome::PlacedOnField(normalized)
            }
            (DragOrigin::Field { .. }, Some(ZoneKind::Bench)) => {
                roster.update_where(is_target, |p| p.is_on_field = false);
                DragOutcome::Benched
            }
            (DragOrigin::Field { start }, Some(ZoneKind::Field)) => {
                let normalized = self.place(geometry, start + delta);
                roster.update_where(is_target, |p| p.field_pct = Some(normalized));
                DragOutcome::Moved(normalized)
            }
            (DragOrigin::Bench, Some(ZoneKind::Bench)) => DragOutcome::Ignored,
        }
    }

    /// Clamp (and optionally snap) a field-relative pixel position, then normalize it.
    fn place(&self, geometry: &FieldGeometry, pixel: Vec2) -> Vec2 {
        let clamped = geometry.clamp_to_area(pixel);
        let pixel = match self.grid {
            Some((cols, rows)) => {
                let (w, h) = geometry.active_area();
                snap_to_grid(clamped, w, h, cols, rows)
            }
            None => clamped,
        };
        geometry.to_normalized(pixel)
    }
}
