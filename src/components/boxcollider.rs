use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Axis-aligned collision box anchored at the entity's feet.
///
/// The box is centered horizontally on the entity position and extends
/// `size.y` upward from it.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    pub fn bounds(&self, position: Vec2) -> (Vec2, Vec2) {
        let min = Vec2::new(position.x - self.size.x / 2.0, position.y);
        (min, min + self.size)
    }

    /// Strict AABB overlap test against an arbitrary world-space rectangle.
    pub fn overlaps_rect(&self, position: Vec2, min: Vec2, max: Vec2) -> bool {
        let (a_min, a_max) = self.bounds(position);
        rects_overlap(a_min, a_max, min, max)
    }
}

/// Strict overlap: shared edges do not count as an intersection.
pub fn rects_overlap(min_a: Vec2, max_a: Vec2, min_b: Vec2, max_b: Vec2) -> bool {
    min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
}

/// Extent of the overlap rectangle between two AABBs, per axis.
pub fn overlap_extent(min_a: Vec2, max_a: Vec2, min_b: Vec2, max_b: Vec2) -> Vec2 {
    max_a.min(max_b) - min_a.max(min_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn bounds_are_anchored_at_the_feet() {
        let collider = BoxCollider::new(24.0, 30.0);
        let (min, max) = collider.bounds(Vec2::new(100.0, 64.0));
        assert!(approx_eq(min.x, 88.0));
        assert!(approx_eq(min.y, 64.0));
        assert!(approx_eq(max.x, 112.0));
        assert!(approx_eq(max.y, 94.0));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let collider = BoxCollider::new(32.0, 32.0);
        // Box spans y [32, 64]; the rect below spans y [0, 32].
        let position = Vec2::new(16.0, 32.0);
        assert!(!collider.overlaps_rect(position, Vec2::new(0.0, 0.0), Vec2::new(32.0, 32.0)));
        assert!(collider.overlaps_rect(
            Vec2::new(16.0, 31.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(32.0, 32.0)
        ));
    }

    #[test]
    fn overlap_extent_matches_intersection() {
        let extent = overlap_extent(
            Vec2::new(10.0, 10.0),
            Vec2::new(40.0, 50.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(60.0, 20.0),
        );
        assert!(approx_eq(extent.x, 10.0));
        assert!(approx_eq(extent.y, 10.0));
    }

    #[test]
    fn overlap_extent_is_negative_when_disjoint() {
        let extent = overlap_extent(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(30.0, 10.0),
        );
        assert!(extent.x < 0.0);
    }
}
