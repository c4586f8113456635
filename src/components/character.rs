//! Character intents layered on top of the physics core.
//!
//! A [`Character`] turns high-level intents (walk, jump, take damage) into
//! acceleration, velocity, and state changes on the underlying components.
//! The physics core itself never reads this component.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::entitystate::{EntityState, EntityStates};
use crate::components::rigidbody::RigidBody;

/// Horizontal walking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Tuning values for a walking, jumping entity.
///
/// `speed` is the acceleration applied per walk intent, not a velocity; the
/// per-axis clamp on [`RigidBody`] bounds the resulting speed.
#[derive(Component, Clone, Debug)]
pub struct Character {
    pub speed: Vec2,
    pub jump_velocity: f32,
    pub hit_points: i32,
}

impl Character {
    pub fn new(speed: Vec2, jump_velocity: f32, hit_points: i32) -> Self {
        Self {
            speed,
            jump_velocity,
            hit_points,
        }
    }

    /// Accelerate horizontally. Idle entities start walking; dying entities
    /// ignore the intent.
    pub fn walk(&self, dir: Direction, body: &mut RigidBody, state: &mut EntityState) {
        if state.is_dying() {
            return;
        }

        match dir {
            Direction::Left => body.add_acceleration(-self.speed.x, 0.0),
            Direction::Right => body.add_acceleration(self.speed.x, 0.0),
        }

        if state.get() == EntityStates::Idle {
            state.set(EntityStates::Walking);
        }
    }

    /// Launch upward. Refused while dying, already jumping, or hurt.
    pub fn jump(&self, body: &mut RigidBody, state: &mut EntityState) {
        match state.get() {
            EntityStates::Dying | EntityStates::Jumping | EntityStates::Hurt => return,
            _ => {}
        }

        state.set(EntityStates::Jumping);
        body.add_velocity(0.0, self.jump_velocity);
    }

    /// Apply damage; at zero hit points the entity starts dying.
    pub fn get_hurt(&mut self, damage: i32, state: &mut EntityState) {
        self.hit_points = (self.hit_points - damage).max(0);
        if self.hit_points == 0 {
            state.set(EntityStates::Dying);
        } else {
            state.set(EntityStates::Hurt);
        }
    }
}
