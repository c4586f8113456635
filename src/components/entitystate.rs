//! Discrete behavior states for entities.
//!
//! [`EntityStates::Dying`] is terminal: once an entity starts dying no other
//! state can be assigned. Aside from Dying (set by the physics core when a
//! lethal tile or the world edge is touched), transitions are driven by game
//! logic such as [`Character`](crate::components::character::Character)
//! intents.

use bevy_ecs::prelude::Component;

/// Possible states an entity can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityStates {
    #[default]
    Idle,
    Walking,
    Jumping,
    Attacking,
    Hurt,
    Dying,
}

/// Current state of an entity. Dying is terminal.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityState {
    current: EntityStates,
}

impl EntityState {
    pub fn new() -> Self {
        EntityState {
            current: EntityStates::Idle,
        }
    }

    pub fn get(&self) -> EntityStates {
        self.current
    }

    /// Assign a new state. Ignored once the entity is Dying.
    pub fn set(&mut self, state: EntityStates) {
        if self.current == EntityStates::Dying {
            return;
        }
        self.current = state;
    }

    pub fn is_dying(&self) -> bool {
        self.current == EntityStates::Dying
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        assert_eq!(EntityState::new().get(), EntityStates::Idle);
    }

    #[test]
    fn transitions_between_live_states() {
        let mut state = EntityState::new();
        state.set(EntityStates::Walking);
        assert_eq!(state.get(), EntityStates::Walking);
        state.set(EntityStates::Jumping);
        assert_eq!(state.get(), EntityStates::Jumping);
    }

    #[test]
    fn dying_is_terminal() {
        let mut state = EntityState::new();
        state.set(EntityStates::Dying);
        state.set(EntityStates::Idle);
        assert_eq!(state.get(), EntityStates::Dying);
        assert!(state.is_dying());
    }
}
