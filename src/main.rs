//! Gridbound main entry point.
//!
//! A 2D tile-platformer framework using:
//! - **bevy_ecs** for entity-component-system architecture
//! - **glam** for 2D vector math
//!
//! This executable runs the self-playing demo headless: a player entity
//! walks across a meadow, warps into a cavern, and meets its end on a row
//! of spikes, exercising kinematics, collision resolution, map transitions,
//! and the state stack along the way.
//!
//! # Main Loop
//!
//! 1. Initialize logging, configuration, the ECS world, and resources
//! 2. Register state factories and event observers
//! 3. Switch to the Intro state
//! 4. Step frames at a fixed delta: pump state requests, update, draw,
//!    process deferred removals
//! 5. Exit when the state stack empties or the frame limit is reached
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! ```

mod components;
mod events;
mod game;
mod resources;
mod systems;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use crate::events::mapchange::observe_map_changed;
use crate::events::statechange::observe_state_changed;
use crate::resources::gameconfig::GameConfig;
use crate::resources::statestack::{StateKind, StateRequests, StateStack};
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::statestack::{
    draw_states, process_state_removals, pump_state_requests, update_states,
};
use crate::systems::time::update_world_time;

/// Frame at which the demo briefly pauses the game.
const DEMO_PAUSE_FRAME: u64 = 180;

/// Gridbound 2D
#[derive(Parser)]
#[command(version, about = "Headless demo driver for the Gridbound tile-platformer framework")]
struct Cli {
    /// Path to the engine configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the initial map from the configuration.
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Override the number of simulation frames to run.
    #[arg(long, value_name = "N")]
    frames: Option<u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::new();
    if let Some(path) = cli.config {
        config.config_path = path;
    }
    config.load_from_file().ok(); // ignore errors, use defaults
    if let Some(map) = cli.map {
        config.initial_map = map;
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }

    let dt = 1.0 / config.target_fps.max(1) as f32;
    let frames = config.frames;

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(TileMap::new());
    world.insert_resource(StateRequests::default());
    world.insert_resource(config);

    let mut stack = StateStack::new();
    game::register_states(&mut stack);
    world.insert_resource(stack);

    world.spawn(Observer::new(observe_map_changed));
    world.spawn(Observer::new(observe_state_changed));
    // Ensure the observers are registered before any event can fire.
    world.flush();

    world
        .resource_mut::<StateRequests>()
        .request_switch(StateKind::Intro);
    pump_state_requests(&mut world);

    // --------------- Main loop ---------------
    for frame in 0..frames {
        update_world_time(&mut world, dt);

        pump_state_requests(&mut world);
        let delta = world.resource::<WorldTime>().delta;
        update_states(&mut world, delta);
        draw_states(&mut world);
        process_state_removals(&mut world);

        world.clear_trackers(); // Clear changed components for next frame

        if world.resource::<WorldTime>().frame_count == DEMO_PAUSE_FRAME {
            world
                .resource_mut::<StateRequests>()
                .request_switch(StateKind::Paused);
        }

        if world.resource::<StateStack>().is_empty() {
            info!("state stack empty after {} frames", frame + 1);
            break;
        }
    }
}
