//! Gridbound library.
//!
//! A 2D tile-platformer framework: entity kinematics, entity-vs-tile
//! collision resolution against a sparse tile grid, and a stack of game
//! states with transparent/transcendent traversal. Built on bevy_ecs; the
//! world is y-up and rendering is left to the embedding application.
//!
//! This module exposes the engine's ECS components, resources, systems,
//! and events for use in integration tests and as a reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
