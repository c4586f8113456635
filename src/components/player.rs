use bevy_ecs::prelude::Component;

/// Marker for the player-controlled entity. Warp tiles only react to it.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;
