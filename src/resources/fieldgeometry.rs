//! Field surface geometry and the coordinate normalizer.
//!
//! Token positions are stored as fractions of the *active play area*: the
//! measured field surface minus one token diameter on each axis, so a token
//! placed at `(1, 1)` still fits entirely inside the surface. The free
//! functions [`to_normalized`] and [`to_pixel`] convert between that space and
//! pixels; [`FieldGeometry`] keeps the current measurements and is refreshed
//! whenever the viewport is resized.

use bevy_ecs::prelude::Resource;

use crate::math::{Vec2, clamp_finite};

/// Token ("dot") diameter in pixels used when no configuration says otherwise.
pub const DEFAULT_DOT_SIZE: f64 = 56.0;

/// Convert a pixel position inside the active play area into `[0,1]²`.
///
/// A zero (or negative) area dimension yields `0` on that axis instead of
/// dividing by zero.
pub fn to_normalized(pixel_x: f64, pixel_y: f64, area_width: f64, area_height: f64) -> Vec2 {
    Vec2::new(
        normalize_axis(pixel_x, area_width),
        normalize_axis(pixel_y, area_height),
    )
}

/// Inverse of [`to_normalized`]; the result never leaves `[0, area]`.
pub fn to_pixel(nx: f64, ny: f64, area_width: f64, area_height: f64) -> Vec2 {
    Vec2::new(pixel_axis(nx, area_width), pixel_axis(ny, area_height))
}

fn normalize_axis(pixel: f64, area: f64) -> f64 {
    if area > 0.0 {
        clamp_finite(pixel / area, 0.0, 1.0)
    } else {
        0.0
    }
}

fn pixel_axis(normalized: f64, area: f64) -> f64 {
    if area > 0.0 {
        clamp_finite(clamp_finite(normalized, 0.0, 1.0) * area, 0.0, area)
    } else {
        0.0
    }
}

/// Snap a pixel position to the nearest intersection of a `cols × rows` grid
/// laid over the active play area. The result is clamped into the area.
pub fn snap_to_grid(pixel: Vec2, area_width: f64, area_height: f64, cols: u32, rows: u32) -> Vec2 {
    Vec2::new(
        snap_axis(pixel.x, area_width, cols),
        snap_axis(pixel.y, area_height, rows),
    )
}

fn snap_axis(pixel: f64, area: f64, cells: u32) -> f64 {
    if area <= 0.0 || cells == 0 {
        return 0.0;
    }
    let cell = area / cells as f64;
    clamp_finite((pixel / cell).round() * cell, 0.0, area)
}

/// Measured field surface.
///
/// `origin` is the surface's top-left corner in the same coordinate space as
/// pointer events; `width`/`height` are its rendered size. Before the first
/// layout both are zero and every conversion collapses to `(0, 0)`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FieldGeometry {
    pub origin: Vec2,
    pub width: f64,
    pub height: f64,
    pub dot_size: f64,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        FieldGeometry::unmeasured(DEFAULT_DOT_SIZE)
    }
}

impl FieldGeometry {
    pub fn unmeasured(dot_size: f64) -> Self {
        FieldGeometry {
            origin: Vec2::zero(),
            width: 0.0,
            height: 0.0,
            dot_size: dot_size.max(0.0),
        }
    }

    /// Geometry whose surface is exactly `area + dot` on each axis.
    pub fn from_active_area(origin: Vec2, area_width: f64, area_height: f64, dot_size: f64) -> Self {
        FieldGeometry {
            origin,
            width: area_width.max(0.0) + dot_size,
            height: area_height.max(0.0) + dot_size,
            dot_size,
        }
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn set_surface(&mut self, origin: Vec2, width: f64, height: f64) {
        self.origin = origin;
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Width and height a token center can range over.
    pub fn active_area(&self) -> (f64, f64) {
        (
            (self.width - self.dot_size).max(0.0),
            (self.height - self.dot_size).max(0.0),
        )
    }

    pub fn to_normalized(&self, pixel: Vec2) -> Vec2 {
        let (w, h) = self.active_area();
        to_normalized(pixel.x, pixel.y, w, h)
    }

    pub fn to_pixel(&self, normalized: Vec2) -> Vec2 {
        let (w, h) = self.active_area();
        to_pixel(normalized.x, normalized.y, w, h)
    }

    /// Clamp a pixel position (relative to the surface origin) into the active area.
    pub fn clamp_to_area(&self, pixel: Vec2) -> Vec2 {
        let (w, h) = self.active_area();
        Vec2::new(clamp_finite(pixel.x, 0.0, w), clamp_finite(pixel.y, 0.0, h))
    }

    /// Largest surface that fits the viewport while keeping the background's
    /// `aspect` (width / height). Returns `(width, height)`.
    ///
    /// A non-positive viewport or aspect yields an unmeasured `(0, 0)`.
    pub fn fit(viewport_width: f64, viewport_height: f64, aspect: f64) -> (f64, f64) {
        if viewport_width <= 0.0 || viewport_height <= 0.0 || aspect <= 0.0 {
            return (0.0, 0.0);
        }
        let viewport_aspect = viewport_width / viewport_height;
        if viewport_aspect > aspect {
            // Viewport is wider than the pitch image: height is the constraint
            (viewport_height * aspect, viewport_height)
        } else {
            (viewport_width, viewport_width / aspect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_normalizes_to_origin() {
        assert_eq!(to_normalized(40.0, 10.0, 0.0, 0.0), Vec2::zero());
        assert_eq!(to_pixel(0.7, 0.2, 0.0, 0.0), Vec2::zero());
    }

    #[test]
    fn out_of_range_pixels_are_clamped() {
        let n = to_normalized(-20.0, 500.0, 200.0, 100.0);
        assert_eq!(n, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn active_area_subtracts_one_dot() {
        let mut g = FieldGeometry::unmeasured(56.0);
        g.set_surface(Vec2::zero(), 256.0, 156.0);
        assert_eq!(g.active_area(), (200.0, 100.0));

        g.set_surface(Vec2::zero(), 30.0, 30.0);
        assert_eq!(g.active_area(), (0.0, 0.0));
    }

    #[test]
    fn fit_keeps_aspect_inside_viewport() {
        let (w, h) = FieldGeometry::fit(1000.0, 500.0, 0.5);
        assert_eq!((w, h), (250.0, 500.0));
        let (w, h) = FieldGeometry::fit(300.0, 1000.0, 0.5);
        assert_eq!((w, h), (300.0, 600.0));
        assert_eq!(FieldGeometry::fit(0.0, 1000.0, 0.5), (0.0, 0.0));
    }

    #[test]
    fn grid_snap_rounds_to_nearest_intersection() {
        let snapped = snap_to_grid(Vec2::new(26.0, 14.0), 200.0, 100.0, 8, 10);
        assert_eq!(snapped, Vec2::new(25.0, 10.0));
        let snapped = snap_to_grid(Vec2::new(199.0, 99.0), 200.0, 100.0, 8, 10);
        assert_eq!(snapped, Vec2::new(200.0, 100.0));
    }
}
