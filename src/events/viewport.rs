//! Viewport resize event and observer.
//!
//! Emitting a [`ViewportResizedEvent`] (window resize or orientation change)
//! refits the field surface to the new viewport, keeping the background's
//! aspect ratio, and lays the bench out in the larger of the leftover strips
//! (to the right of or below the field). The drop zone colliders are updated
//! in the same step so the next release is hit-tested against the new layout.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::boxcollider::BoxCollider;
use crate::components::dropzone::{DropZone, ZoneKind};
use crate::components::mapposition::MapPosition;
use crate::math::Vec2;
use crate::resources::boardconfig::BoardConfig;
use crate::resources::fieldgeometry::FieldGeometry;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ViewportResizedEvent {
    pub width: f64,
    pub height: f64,
}

/// Field and bench rectangles as `(origin, size)` for a viewport.
pub fn layout_zones(viewport: Vec2, aspect: f64) -> ((Vec2, Vec2), (Vec2, Vec2)) {
    let (fw, fh) = FieldGeometry::fit(viewport.x, viewport.y, aspect);
    let right = Vec2::new((viewport.x - fw).max(0.0), viewport.y.max(0.0));
    let below = Vec2::new(viewport.x.max(0.0), (viewport.y - fh).max(0.0));
    let bench = if right.x * right.y >= below.x * below.y {
        (Vec2::new(fw, 0.0), right)
    } else {
        (Vec2::new(0.0, fh), below)
    };
    ((Vec2::zero(), Vec2::new(fw, fh)), bench)
}

/// Observer that refits the field and re-lays out the drop zones.
pub fn viewport_resized_observer(
    trigger: On<ViewportResizedEvent>,
    config: Res<BoardConfig>,
    mut geometry: ResMut<FieldGeometry>,
    mut zones: Query<(&DropZone, &mut MapPosition, &mut BoxCollider)>,
) {
    let event = trigger.event();
    let ((field_origin, field_size), (bench_origin, bench_size)) =
        layout_zones(Vec2::new(event.width, event.height), config.field_aspect);
    geometry.set_surface(field_origin, field_size.x, field_size.y);
    info!(
        "Viewport {}x{}: field {}x{}",
        event.width, event.height, field_size.x, field_size.y
    );

    for (zone, mut position, mut collider) in zones.iter_mut() {
        let (origin, size) = match zone.kind {
            ZoneKind::Field => (field_origin, field_size),
            ZoneKind::Bench => (bench_origin, bench_size),
        };
        position.pos = origin;
        *collider = BoxCollider::new(size.x, size.y);
    }
}
