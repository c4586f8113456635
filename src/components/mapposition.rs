use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position of an entity, in pixels, y pointing up.
///
/// `pos` is the entity's feet: the horizontal center and bottom edge of its
/// collision box. `old_pos` holds the position before the last movement.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vec2,
    pub old_pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        let pos = Vec2::new(x, y);
        MapPosition { pos, old_pos: pos }
    }
}
