//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities
//! in the game world.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned collision box anchored at the entity's feet
//! - [`character`] – walk/jump/hurt intents layered on the physics core
//! - [`collisionstate`] – per-tick contact flags and the standing-on tile handle
//! - [`entitystate`] – discrete behavior states with a terminal Dying state
//! - [`mapposition`] – world-space position (current and previous)
//! - [`player`] – marker for the player-controlled entity
//! - [`rigidbody`] – velocity, acceleration accumulator, and axis limits

pub mod boxcollider;
pub mod character;
pub mod collisionstate;
pub mod entitystate;
pub mod mapposition;
pub mod player;
pub mod rigidbody;
