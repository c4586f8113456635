//! Integration tests for map loading and between-frame map transitions.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;

use gridbound::components::boxcollider::BoxCollider;
use gridbound::components::collisionstate::CollisionState;
use gridbound::components::entitystate::EntityState;
use gridbound::components::mapposition::MapPosition;
use gridbound::components::player::Player;
use gridbound::components::rigidbody::RigidBody;
use gridbound::events::mapchange::observe_map_changed;
use gridbound::resources::gameconfig::GameConfig;
use gridbound::resources::tilemap::{TileCell, TileMap};
use gridbound::resources::worldtime::WorldTime;
use gridbound::systems::collision::collision;
use gridbound::systems::maptransition::map_transition;
use gridbound::systems::time::update_world_time;

fn loaded_map() -> TileMap {
    let mut map = TileMap::new();
    map.load_tile_set("assets/tiles.cfg").unwrap();
    map.load_map("assets/maps/meadow.map").unwrap();
    map
}

#[test]
fn demo_assets_load() {
    let map = loaded_map();
    assert_eq!(map.map_size(), (20, 12));
    assert_eq!(map.gravity(), 512.0);
    assert_eq!(map.player_start(), Vec2::new(64.0, 96.0));
    assert_eq!(map.next_map(), Some("cavern.map"));
    assert_eq!(map.background(), Some("meadow.png"));
    assert!(map.get_tile(19, 2).unwrap().warp);
    assert!(!map.get_tile(0, 2).unwrap().warp);
    let ground = map.tile_info_at(TileCell { x: 0, y: 2 }).unwrap();
    assert_eq!(ground.name, "ground");
    assert_eq!(ground.friction, Vec2::new(12.0, 0.0));
    let ice = map.tile_info_at(TileCell { x: 9, y: 2 }).unwrap();
    assert_eq!(ice.name, "ice");
}

fn make_world(map: TileMap) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(GameConfig::new());
    world.insert_resource(map);
    world.spawn(Observer::new(observe_map_changed));
    world.flush();
    world
}

fn spawn_player(world: &mut World, pos: Vec2) -> Entity {
    world
        .spawn((
            Player,
            MapPosition::new(pos.x, pos.y),
            RigidBody::new(Vec2::new(200.0, 800.0), Vec2::ZERO),
            BoxCollider::new(24.0, 30.0),
            EntityState::new(),
            CollisionState::default(),
        ))
        .id()
}

#[test]
fn warp_contact_swaps_the_map_and_invalidates_tile_handles() {
    let mut world = make_world(loaded_map());
    // One pixel into the warp tile at cell (19, 2) so detection visits it.
    let entity = spawn_player(&mut world, Vec2::new(624.0, 95.0));

    update_world_time(&mut world, 1.0 / 60.0);
    let mut schedule = Schedule::default();
    schedule.add_systems(collision);
    schedule.run(&mut world);

    // Contact resolved upward and latched the transition.
    {
        let collision_state = world.get::<CollisionState>(entity).unwrap();
        assert_eq!(
            collision_state.reference_tile,
            Some(TileCell { x: 19, y: 2 })
        );
    }

    map_transition(&mut world);

    let map = world.resource::<TileMap>();
    // The cavern has spikes where the meadow had ice, and no next map.
    assert_eq!(map.next_map(), None);
    assert!(map.tile_info_at(TileCell { x: 9, y: 2 }).unwrap().deadly);

    // The observer dropped the stale handle and respawned the player.
    let position = world.get::<MapPosition>(entity).unwrap();
    let collision_state = world.get::<CollisionState>(entity).unwrap();
    assert_eq!(position.pos, Vec2::new(64.0, 96.0));
    assert!(collision_state.reference_tile.is_none());
    assert!(!collision_state.on_x);
    assert!(!collision_state.on_y);
}

#[test]
fn a_latch_without_a_next_map_is_dropped() {
    let mut map = loaded_map();
    map.load_map("assets/maps/cavern.map").unwrap();
    map.request_next_map();
    let mut world = make_world(map);

    map_transition(&mut world);

    // Still the cavern; nothing was purged.
    let map = world.resource::<TileMap>();
    assert!(map.tile_info_at(TileCell { x: 9, y: 2 }).unwrap().deadly);
}

#[test]
fn a_missing_next_map_file_keeps_the_current_map() {
    let mut map = loaded_map();
    map.set_next_map("does_not_exist.map");
    map.request_next_map();
    let mut world = make_world(map);

    map_transition(&mut world);

    let map = world.resource::<TileMap>();
    assert!(map.get_tile(19, 2).unwrap().warp);
    assert_eq!(map.map_size(), (20, 12));
}
