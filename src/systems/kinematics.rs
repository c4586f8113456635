//! Per-tick motion integration.
//!
//! Each tick, for every entity with the full physics component set, in this
//! exact order (later steps depend on values written by earlier ones):
//!
//! 1. gravity is accumulated into the acceleration,
//! 2. acceleration integrates into velocity, clamped per axis,
//! 3. the acceleration accumulator is reset,
//! 4. friction is sourced from the standing-on tile, else the map's default
//!    tile, else the body's own fallback; a lethal standing-on tile kills
//!    before any movement,
//! 5. friction decelerates the velocity without reversing it,
//! 6. the entity moves by `velocity * dt`, clamped to the world bounds,
//! 7. contact flags are cleared for the collision pass that follows.
//!
//! The collision system is expected to run after this one in the same
//! schedule; see [`crate::systems::collision`].

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::collisionstate::CollisionState;
use crate::components::entitystate::{EntityState, EntityStates};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;

/// Displace an entity, clamping to the world bounds.
///
/// Horizontal edges only clamp. Reaching the bottom of the world
/// (`y == 0`) kills the entity; the top edge clamps without killing.
pub fn move_entity(position: &mut MapPosition, state: &mut EntityState, map: &TileMap, delta: Vec2) {
    position.old_pos = position.pos;
    position.pos += delta;

    let (width, height) = map.map_size();
    let tile_size = map.tile_size() as f32;
    let max_x = (width + 1) as f32 * tile_size;
    let max_y = (height + 1) as f32 * tile_size;

    if position.pos.x < 0.0 {
        position.pos.x = 0.0;
    } else if position.pos.x > max_x {
        position.pos.x = max_x;
    }

    if position.pos.y > max_y {
        position.pos.y = max_y;
    } else if position.pos.y < 0.0 {
        position.pos.y = 0.0;
        state.set(EntityStates::Dying);
    }
}

pub fn kinematics(
    mut query: Query<(
        &mut MapPosition,
        &mut RigidBody,
        &mut EntityState,
        &mut CollisionState,
    )>,
    map: Res<TileMap>,
    time: Res<WorldTime>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }

    for (mut position, mut body, mut state, mut collision) in query.iter_mut() {
        body.add_acceleration(0.0, -map.gravity());
        let dv = body.acceleration * dt;
        body.add_velocity(dv.x, dv.y);
        body.reset_acceleration();

        let friction = match collision.reference_tile.and_then(|cell| map.tile_info_at(cell)) {
            Some(info) => {
                if info.deadly {
                    state.set(EntityStates::Dying);
                }
                info.friction
            }
            None => match map.default_tile() {
                Some(info) => info.friction,
                None => body.friction,
            },
        };
        body.apply_friction(friction.x * dt, friction.y * dt);

        let delta = body.velocity * dt;
        move_entity(&mut position, &mut state, &map, delta);

        collision.on_x = false;
        collision.on_y = false;
    }
}
