use bevy_ecs::prelude::Component;

use crate::math::Vec2;

/// Top-left corner of an entity in pointer (page) coordinates.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f64, y: f64) -> Self {
        MapPosition {
            pos: Vec2::new(x, y),
        }
    }
}
