use bevy_ecs::prelude::*;
use log::info;

use crate::resources::fieldgeometry::FieldGeometry;
use crate::resources::roster::Roster;

/// One-time conversion of legacy pixel positions to normalized ones.
///
/// Waits for the first frame with a measured field surface, converts every
/// on-field player that has no normalized position yet using that geometry,
/// and never runs again for this session.
pub fn migrate_legacy_positions(
    mut done: Local<bool>,
    geometry: Res<FieldGeometry>,
    mut roster: ResMut<Roster>,
) {
    if *done || !geometry.is_measured() {
        return;
    }
    let (w, h) = geometry.active_area();
    let migrated = roster.migrate_legacy_positions(w, h);
    if migrated > 0 {
        info!("Migrated {} legacy field positions", migrated);
    }
    *done = true;
}
