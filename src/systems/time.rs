//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance elapsed time, the frame counter, and the scaled delta.
///
/// `dt` is expected to be the unscaled frame delta in seconds.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut time = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * time.time_scale;
    time.elapsed += scaled_dt;
    time.delta = scaled_dt;
    time.frame_count += 1;
}
