//! Engine systems.
//!
//! This module groups the ECS systems and exclusive frame-driver steps that
//! advance the simulation.
//!
//! Submodules overview
//! - [`collision`] – entity-vs-tile detection, ranking, and resolution
//! - [`kinematics`] – gravity, velocity, friction, and movement integration
//! - [`maptransition`] – between-frame consumption of the warp latch
//! - [`statestack`] – frame-driver entry points for the state stack
//! - [`time`] – update simulation time and delta

pub mod collision;
pub mod kinematics;
pub mod maptransition;
pub mod statestack;
pub mod time;
