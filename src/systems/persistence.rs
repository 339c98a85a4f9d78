use bevy_ecs::prelude::*;
use log::{trace, warn};

use crate::resources::kvstore::BoardStore;
use crate::resources::roster::Roster;

/// Write the records a frame modified back to the store.
///
/// Only changed keys are written, so a playing-time batch rewrites the player
/// list and nothing else. A failed write is logged and not retried until the
/// roster changes again.
pub fn persist_roster(mut roster: ResMut<Roster>, store: Option<ResMut<BoardStore>>) {
    if !roster.is_dirty() {
        return;
    }
    let Some(mut store) = store else {
        return;
    };
    let roster = roster.bypass_change_detection();
    match roster.save_changes(store.0.as_mut()) {
        Ok(written) => trace!("Persisted {} roster records", written),
        Err(e) => {
            warn!("Failed to persist roster: {}", e);
            roster.clear_dirty();
        }
    }
}
