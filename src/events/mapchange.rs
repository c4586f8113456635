//! Map transition event and observer.
//!
//! Triggered by [`crate::systems::maptransition::map_transition`] right
//! after a new map replaces the old one. The old map's tiles are gone at
//! that point, so every entity's standing-on handle must be invalidated
//! before any system reads it again; the observer here does that, and also
//! re-places player entities at the new map's start position.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::collisionstate::CollisionState;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::tilemap::TileMap;

/// Fired after the active map has been replaced.
#[derive(Event, Debug, Clone, Copy)]
pub struct MapChangedEvent {}

/// Observer that drops stale tile handles and respawns the player.
pub fn observe_map_changed(
    _trigger: On<MapChangedEvent>,
    map: Res<TileMap>,
    mut query: Query<(&mut MapPosition, &mut CollisionState, Option<&Player>)>,
) {
    let start = map.player_start();
    let mut entities = 0;
    for (mut position, mut collision, player) in query.iter_mut() {
        collision.reset();
        if player.is_some() {
            position.pos = start;
            position.old_pos = start;
        }
        entities += 1;
    }
    info!(
        "map changed: invalidated tile handles on {} entities, player start ({}, {})",
        entities, start.x, start.y
    );
}
