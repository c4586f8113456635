//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `gameconfig` – settings loaded from the INI configuration file
//! - `statestack` – ordered stack of game states and queued transition intents
//! - `tilemap` – the active tile grid, tile set, and per-map metadata
//! - `worldtime` – simulation time and delta

pub mod gameconfig;
pub mod statestack;
pub mod tilemap;
pub mod worldtime;
