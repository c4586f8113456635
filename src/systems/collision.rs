//! Entity-vs-tile collision detection and resolution.
//!
//! Detection walks the inclusive range of grid cells covered by the
//! entity's box and records one candidate per occupied cell with the exact
//! overlap area. A warp tile visited by the player latches a map
//! transition on the [`TileMap`], consumed at the start of the next frame.
//!
//! Resolution processes candidates in descending overlap order, re-checking
//! each against the already-corrected box, so the dominant contact wins and
//! candidates it pushed clear of are skipped. The push axis is the one with
//! the larger center distance; ties resolve vertically. The first vertical
//! contact of a tick becomes the entity's standing-on tile.

use bevy_ecs::prelude::*;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::boxcollider::{BoxCollider, overlap_extent, rects_overlap};
use crate::components::collisionstate::CollisionState;
use crate::components::entitystate::{EntityState, EntityStates};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::resources::tilemap::{TileCell, TileMap};
use crate::resources::worldtime::WorldTime;
use crate::systems::kinematics::move_entity;

/// One tile overlapping the entity's box this tick. Never outlives the
/// resolution pass.
struct CollisionCandidate {
    area: f32,
    cell: TileCell,
    min: Vec2,
    max: Vec2,
}

type Candidates = SmallVec<[CollisionCandidate; 8]>;

pub fn collision(
    mut query: Query<(
        &mut MapPosition,
        &mut RigidBody,
        &BoxCollider,
        &mut EntityState,
        &mut CollisionState,
        Option<&Player>,
    )>,
    mut map: ResMut<TileMap>,
    time: Res<WorldTime>,
) {
    // A zero-length tick is a complete no-op, like the integration step.
    if time.delta <= 0.0 {
        return;
    }

    for (mut position, mut body, collider, mut state, mut collision, player) in query.iter_mut() {
        let (mut candidates, warp) =
            check_collisions(collider, position.pos, &map, player.is_some());
        if warp {
            map.request_next_map();
        }
        resolve_collisions(
            &mut candidates,
            &mut position,
            &mut body,
            collider,
            &mut state,
            &mut collision,
            &map,
        );
    }
}

/// Gather a candidate for every placed tile the box overlaps, and report
/// whether a warp tile was visited by the player.
fn check_collisions(
    collider: &BoxCollider,
    position: Vec2,
    map: &TileMap,
    is_player: bool,
) -> (Candidates, bool) {
    let mut candidates = Candidates::new();
    let mut warp = false;

    let (min, max) = collider.bounds(position);
    let tile_size = map.tile_size() as f32;
    let from_x = (min.x / tile_size).floor() as i32;
    let to_x = (max.x / tile_size).floor() as i32;
    let from_y = (min.y / tile_size).floor() as i32;
    let to_y = (max.y / tile_size).floor() as i32;

    for x in from_x..=to_x {
        for y in from_y..=to_y {
            let Some(tile) = map.get_tile(x, y) else {
                continue;
            };
            let cell = TileCell {
                x: x as u32,
                y: y as u32,
            };
            let (tile_min, tile_max) = map.cell_bounds(cell);
            let extent = overlap_extent(min, max, tile_min, tile_max);
            candidates.push(CollisionCandidate {
                area: extent.x * extent.y,
                cell,
                min: tile_min,
                max: tile_max,
            });

            if tile.warp && is_player {
                warp = true;
            }
        }
    }

    (candidates, warp)
}

/// Apply positional corrections for this tick's candidates, largest overlap
/// first, and settle the standing-on tile.
fn resolve_collisions(
    candidates: &mut Candidates,
    position: &mut MapPosition,
    body: &mut RigidBody,
    collider: &BoxCollider,
    state: &mut EntityState,
    collision: &mut CollisionState,
    map: &TileMap,
) {
    if !candidates.is_empty() {
        candidates.sort_unstable_by(|a, b| b.area.total_cmp(&a.area));

        for candidate in candidates.iter() {
            let (min, max) = collider.bounds(position.pos);
            if !rects_overlap(min, max, candidate.min, candidate.max) {
                continue;
            }

            let x_diff = (min.x + max.x) / 2.0 - (candidate.min.x + candidate.max.x) / 2.0;
            let y_diff = (min.y + max.y) / 2.0 - (candidate.min.y + candidate.max.y) / 2.0;

            if x_diff.abs() > y_diff.abs() {
                let resolve = if x_diff > 0.0 {
                    candidate.max.x - min.x
                } else {
                    -(max.x - candidate.min.x)
                };
                move_entity(position, state, map, Vec2::new(resolve, 0.0));
                body.velocity.x = 0.0;
                collision.on_x = true;
            } else {
                let resolve = if y_diff > 0.0 {
                    candidate.max.y - min.y
                } else {
                    -(max.y - candidate.min.y)
                };
                move_entity(position, state, map, Vec2::new(0.0, resolve));
                body.velocity.y = 0.0;
                if collision.on_y {
                    continue;
                }
                collision.reference_tile = Some(candidate.cell);
                collision.on_y = true;
                if map
                    .tile_info_at(candidate.cell)
                    .is_some_and(|info| info.deadly)
                {
                    state.set(EntityStates::Dying);
                }
            }
        }

        candidates.clear();
    }

    if !collision.on_y {
        collision.reference_tile = None;
    }
}
