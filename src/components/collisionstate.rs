use bevy_ecs::prelude::Component;

use crate::resources::tilemap::TileCell;

/// Per-tick tile contact bookkeeping for an entity.
///
/// `reference_tile` is the cell the entity is currently standing on; it is a
/// lookup handle into the active map, never an owning reference. After a map
/// purge a stale handle simply resolves to no tile. Both flags are cleared
/// at the start of every collision pass and set again by the resolver.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CollisionState {
    pub on_x: bool,
    pub on_y: bool,
    pub reference_tile: Option<TileCell>,
}

impl CollisionState {
    pub fn reset(&mut self) {
        self.on_x = false;
        self.on_y = false;
        self.reference_tile = None;
    }
}
