//! Minimal 2D vector used for pixel and normalized positions.
//!
//! Field positions are persisted as `{ "x": .., "y": .. }` objects, so the
//! type derives serde directly.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub const fn zero() -> Self {
        Vec2 { x: 0.0, y: 0.0 }
    }

    pub fn scale_by(self, factor: f64) -> Self {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Clamp that maps NaN and infinities to `min` instead of propagating them.
pub fn clamp_finite(v: f64, min: f64, max: f64) -> f64 {
    if v.is_finite() { v.max(min).min(max) } else { min }
}
