//! Drop zone marker.
//!
//! The field and the bench are each spawned as an entity carrying a
//! [`DropZone`], a [`MapPosition`](crate::components::mapposition::MapPosition)
//! and a [`BoxCollider`](crate::components::boxcollider::BoxCollider). At
//! release time the dragged token's rectangle is tested against every zone;
//! see [`find_drop_target`](crate::systems::drag::find_drop_target).

use bevy_ecs::prelude::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Bench,
    Field,
}

/// A region tokens can be dropped on.
///
/// `order` is the stacking order: when a token overlaps more than one zone
/// the highest order is reported first. Valid layouts never overlap zones.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropZone {
    pub kind: ZoneKind,
    pub order: i32,
}

impl DropZone {
    pub fn new(kind: ZoneKind, order: i32) -> Self {
        DropZone { kind, order }
    }
}
