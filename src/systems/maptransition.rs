//! Between-frame map transitions.
//!
//! Warp contact during collision detection only latches a request on the
//! [`TileMap`]; this step consumes the latch strictly between simulation
//! ticks, loads the named next map, and triggers
//! [`MapChangedEvent`](crate::events::mapchange::MapChangedEvent) so
//! observers can invalidate stale tile handles. A latch with no configured
//! next-map name is dropped silently.

use bevy_ecs::prelude::*;
use log::warn;

use crate::events::mapchange::MapChangedEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::tilemap::TileMap;

pub fn map_transition(world: &mut World) {
    let pending = world.resource_mut::<TileMap>().take_next_map();
    let Some(name) = pending else {
        return;
    };

    let path = world.resource::<GameConfig>().map_dir.join(&name);
    let result = world.resource_mut::<TileMap>().load_map(&path);
    match result {
        Ok(()) => {
            world.trigger(MapChangedEvent {});
        }
        Err(e) => warn!("map transition to {:?} failed: {}", name, e),
    }
}
