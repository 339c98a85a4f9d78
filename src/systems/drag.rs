//! Drop-target hit testing and the drag observers.
//!
//! - [`find_drop_target`] – which zone a released token lands on
//! - [`drag_start_observer`] – pick up a token on [`DragStartEvent`]
//! - [`drag_end_observer`] – hit-test and commit on [`DragEndEvent`]
//! - [`announce_drag_outcome`] – log committed gestures

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::dropzone::{DropZone, ZoneKind};
use crate::components::mapposition::MapPosition;
use crate::events::drag::{DragEndEvent, DragOutcomeEvent, DragStartEvent};
use crate::math::Vec2;
use crate::resources::drag::{DragController, DragOutcome};
use crate::resources::fieldgeometry::FieldGeometry;
use crate::resources::roster::Roster;

/// Zone whose rectangle intersects the token's, preferring the highest
/// [`DropZone::order`] when several match.
pub fn find_drop_target<'a>(
    token: &BoxCollider,
    token_pos: Vec2,
    zones: impl IntoIterator<Item = (&'a DropZone, &'a MapPosition, &'a BoxCollider)>,
) -> Option<ZoneKind> {
    let hits: SmallVec<[&DropZone; 2]> = zones
        .into_iter()
        .filter(|(_, position, collider)| token.overlaps(token_pos, collider, position.pos))
        .map(|(zone, _, _)| zone)
        .collect();
    hits.iter().max_by_key(|zone| zone.order).map(|zone| zone.kind)
}

pub fn drag_start_observer(
    trigger: On<DragStartEvent>,
    roster: Res<Roster>,
    geometry: Res<FieldGeometry>,
    mut drag: ResMut<DragController>,
) {
    let player_id = &trigger.event().player_id;
    if !drag.begin_drag(&roster, &geometry, player_id) {
        debug!("Drag start ignored for {}", player_id);
    }
}

pub fn drag_end_observer(
    trigger: On<DragEndEvent>,
    mut roster: ResMut<Roster>,
    geometry: Res<FieldGeometry>,
    mut drag: ResMut<DragController>,
    zones: Query<(&DropZone, &MapPosition, &BoxCollider)>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let player_id = drag.active_player().map(str::to_string);

    let token = BoxCollider::new(event.token_size.x, event.token_size.y);
    let target = find_drop_target(&token, event.token_pos, zones.iter());
    let center = token.center(event.token_pos);
    let outcome = drag.end_drag(&mut roster, &geometry, target, event.delta, center);

    if let Some(player_id) = player_id {
        commands.trigger(DragOutcomeEvent { player_id, outcome });
    }
}

/// Log the user-visible result of a gesture.
pub fn announce_drag_outcome(trigger: On<DragOutcomeEvent>, roster: Res<Roster>) {
    let event = trigger.event();
    let name = roster
        .player(&event.player_id)
        .map(|p| p.name.as_str())
        .unwrap_or("?");
    match event.outcome {
        DragOutcome::PlacedOnField(_) => info!("{}: on field", name),
        DragOutcome::Benched => info!("{}: benched", name),
        DragOutcome::Moved(pos) => debug!("{} moved to ({:.3}, {:.3})", name, pos.x, pos.y),
        DragOutcome::Discarded | DragOutcome::Ignored => debug!("{}: {:?}", name, event.outcome),
    }
}
