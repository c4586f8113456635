//! Self-playing demo game built on the engine.
//!
//! Registers four stacked states:
//!
//! - [`IntroState`] – brief splash, then hands off to the game
//! - [`PlayState`] – owns the physics schedule; loads the tile set and the
//!   initial map, spawns the player, and walks it toward the warp tile
//! - [`PausedState`] – transparent overlay that suspends game logic for a
//!   short hold, demonstrating the transparent/transcendent split
//! - [`GameOverState`] – entered when the player dies; winds the demo down
//!
//! Everything runs headless: `draw` hooks log instead of rendering.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info, warn};

use crate::components::boxcollider::BoxCollider;
use crate::components::character::{Character, Direction};
use crate::components::collisionstate::CollisionState;
use crate::components::entitystate::EntityState;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::resources::gameconfig::GameConfig;
use crate::resources::statestack::{State, StateFlags, StateKind, StateRequests, StateStack};
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::collision;
use crate::systems::kinematics::kinematics;
use crate::systems::maptransition::map_transition;

const INTRO_HOLD: f32 = 1.0;
const PAUSE_HOLD: f32 = 1.0;
const GAME_OVER_HOLD: f32 = 1.5;

/// Register the demo's state factories and their initial flags.
pub fn register_states(stack: &mut StateStack) {
    stack.register(StateKind::Intro, StateFlags::default(), || {
        Box::new(IntroState::new(INTRO_HOLD))
    });
    stack.register(StateKind::Game, StateFlags::default(), || {
        Box::new(PlayState::new())
    });
    stack.register(
        StateKind::Paused,
        StateFlags {
            transparent: true,
            transcendent: false,
        },
        || Box::new(PausedState::new(PAUSE_HOLD)),
    );
    stack.register(StateKind::GameOver, StateFlags::default(), || {
        Box::new(GameOverState::new(GAME_OVER_HOLD))
    });
}

/// Splash state that hands off to the game after a short hold.
pub struct IntroState {
    hold: f32,
    elapsed: f32,
    done: bool,
}

impl IntroState {
    pub fn new(hold: f32) -> Self {
        Self {
            hold,
            elapsed: 0.0,
            done: false,
        }
    }
}

impl State for IntroState {
    fn update(&mut self, world: &mut World, dt: f32) {
        self.elapsed += dt;
        if self.elapsed >= self.hold && !self.done {
            self.done = true;
            let mut requests = world.resource_mut::<StateRequests>();
            requests.request_switch(StateKind::Game);
            requests.request_remove(StateKind::Intro);
        }
    }

    fn draw(&mut self, _world: &mut World) {
        debug!("intro splash {:.2}s", self.elapsed);
    }
}

/// The playing state: loads the world, owns the physics schedule, and
/// drives the demo player.
pub struct PlayState {
    schedule: Schedule,
    game_over_requested: bool,
}

impl PlayState {
    pub fn new() -> Self {
        let mut schedule = Schedule::default();
        schedule.add_systems((kinematics, collision).chain());
        Self {
            schedule,
            game_over_requested: false,
        }
    }
}

impl Default for PlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for PlayState {
    fn on_create(&mut self, world: &mut World) {
        let (tileset, initial) = {
            let config = world.resource::<GameConfig>();
            (config.tileset_path.clone(), config.initial_map.clone())
        };

        {
            let mut map = world.resource_mut::<TileMap>();
            if let Err(e) = map.load_tile_set(&tileset) {
                warn!("{}", e);
            }
            if let Err(e) = map.load_map(&initial) {
                warn!("{}", e);
            }
        }

        let start = world.resource::<TileMap>().player_start();
        world.spawn((
            Player,
            Character::new(Vec2::new(400.0, 0.0), 250.0, 3),
            MapPosition::new(start.x, start.y),
            RigidBody::new(Vec2::new(200.0, 800.0), Vec2::new(6.0, 0.0)),
            BoxCollider::new(24.0, 30.0),
            EntityState::new(),
            CollisionState::default(),
        ));
        info!("game world ready, player at ({}, {})", start.x, start.y);
    }

    fn on_destroy(&mut self, world: &mut World) {
        let mut players = world.query_filtered::<Entity, With<Player>>();
        let players: Vec<Entity> = players.iter(world).collect();
        for entity in players {
            world.despawn(entity);
        }
    }

    fn activate(&mut self, _world: &mut World) {
        info!("game active");
    }

    fn deactivate(&mut self, _world: &mut World) {
        info!("game suspended");
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        map_transition(world);

        // The demo player always presses right.
        let mut walkers =
            world.query_filtered::<(&Character, &mut RigidBody, &mut EntityState), With<Player>>();
        for (character, mut body, mut state) in walkers.iter_mut(world) {
            character.walk(Direction::Right, &mut body, &mut state);
        }

        self.schedule.run(world);

        if !self.game_over_requested {
            let mut players = world.query_filtered::<&EntityState, With<Player>>();
            if players.iter(world).any(|state| state.is_dying()) {
                self.game_over_requested = true;
                world
                    .resource_mut::<StateRequests>()
                    .request_switch(StateKind::GameOver);
            }
        }
    }

    fn draw(&mut self, world: &mut World) {
        if world.resource::<WorldTime>().frame_count % 30 != 0 {
            return;
        }
        let mut players = world.query_filtered::<(&MapPosition, &EntityState), With<Player>>();
        for (position, state) in players.iter(world) {
            debug!(
                "player at ({:.1}, {:.1}) {:?}",
                position.pos.x,
                position.pos.y,
                state.get()
            );
        }
    }
}

/// Transparent overlay that suspends the game for a short hold.
pub struct PausedState {
    hold: f32,
    elapsed: f32,
}

impl PausedState {
    pub fn new(hold: f32) -> Self {
        Self { hold, elapsed: 0.0 }
    }
}

impl State for PausedState {
    fn activate(&mut self, _world: &mut World) {
        info!("paused");
    }

    fn on_destroy(&mut self, _world: &mut World) {
        info!("resumed");
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        self.elapsed += dt;
        if self.elapsed >= self.hold {
            world
                .resource_mut::<StateRequests>()
                .request_remove(StateKind::Paused);
        }
    }

    fn draw(&mut self, _world: &mut World) {
        debug!("pause overlay");
    }
}

/// Terminal state reached when the player dies.
pub struct GameOverState {
    hold: f32,
    elapsed: f32,
}

impl GameOverState {
    pub fn new(hold: f32) -> Self {
        Self { hold, elapsed: 0.0 }
    }
}

impl State for GameOverState {
    fn activate(&mut self, _world: &mut World) {
        info!("game over");
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        self.elapsed += dt;
        if self.elapsed >= self.hold {
            let mut requests = world.resource_mut::<StateRequests>();
            requests.request_remove(StateKind::GameOver);
            requests.request_remove(StateKind::Game);
        }
    }

    fn draw(&mut self, _world: &mut World) {
        debug!("game over screen");
    }
}
