use bevy_ecs::prelude::Component;

use crate::math::Vec2;

/// Axis-aligned rectangle attached to an entity, positioned by its
/// [`MapPosition`](crate::components::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p1 = position + self.size;
        let min = Vec2::new(position.x.min(p1.x), position.y.min(p1.y));
        let max = Vec2::new(position.x.max(p1.x), position.y.max(p1.y));
        (min, max)
    }

    /// Center of the AABB for a given entity position.
    pub fn center(&self, position: Vec2) -> Vec2 {
        let (min, max) = self.aabb(position);
        Vec2::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        assert!(!a.overlaps(Vec2::zero(), &b, Vec2::new(10.0, 0.0)));
        assert!(a.overlaps(Vec2::zero(), &b, Vec2::new(9.0, 9.0)));
    }

    #[test]
    fn negative_size_is_normalized() {
        let c = BoxCollider::new(-4.0, -4.0);
        let at = Vec2::new(4.0, 4.0);
        assert_eq!(c.aabb(at), (Vec2::zero(), Vec2::new(4.0, 4.0)));
        assert_eq!(c.center(at), Vec2::new(2.0, 2.0));
        assert!(c.overlaps(at, &BoxCollider::new(1.0, 1.0), Vec2::new(1.0, 1.0)));
    }
}
