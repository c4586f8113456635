//! Kinematic body component for tile-platformer entities.
//!
//! The [`RigidBody`] component stores velocity, an instantaneous per-tick
//! acceleration accumulator, the per-axis velocity limits, and a fallback
//! friction used while airborne over a map with no default tile.
//!
//! The acceleration accumulator is filled by game logic (walk intents,
//! jumps) and by the kinematics system (gravity), integrated into velocity
//! once per tick, and then reset. It never persists across ticks.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity, acceleration, and per-axis limits.
///
/// # Fields
/// - `velocity` - Current velocity in pixels per second
/// - `max_velocity` - Per-axis velocity limit; each axis is clamped
///   independently, so diagonal speed can exceed either component
/// - `acceleration` - Per-tick force accumulator, reset after integration
/// - `friction` - Fallback deceleration when no tile supplies one
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub max_velocity: Vec2,
    pub acceleration: Vec2,
    pub friction: Vec2,
}

impl RigidBody {
    pub fn new(max_velocity: Vec2, friction: Vec2) -> Self {
        Self {
            velocity: Vec2::ZERO,
            max_velocity,
            acceleration: Vec2::ZERO,
            friction,
        }
    }

    /// Add to the velocity, clamping each axis independently to
    /// `[-max_velocity, max_velocity]`.
    pub fn add_velocity(&mut self, x: f32, y: f32) {
        self.velocity.x += x;
        if self.velocity.x.abs() > self.max_velocity.x {
            self.velocity.x = self.max_velocity.x.copysign(self.velocity.x);
        }

        self.velocity.y += y;
        if self.velocity.y.abs() > self.max_velocity.y {
            self.velocity.y = self.max_velocity.y.copysign(self.velocity.y);
        }
    }

    /// Accumulate an acceleration force for this tick.
    pub fn add_acceleration(&mut self, x: f32, y: f32) {
        self.acceleration += Vec2::new(x, y);
    }

    /// Clear the per-tick acceleration accumulator.
    pub fn reset_acceleration(&mut self) {
        self.acceleration = Vec2::ZERO;
    }

    /// Decelerate each axis by the given amount without ever reversing it.
    ///
    /// If the remaining speed on an axis is smaller than the friction
    /// amount, that axis is clamped to exactly zero. Signs of the friction
    /// arguments are ignored; friction always opposes the current velocity.
    pub fn apply_friction(&mut self, x: f32, y: f32) {
        let friction = Vec2::new(x.abs(), y.abs());

        if self.velocity.x != 0.0 {
            if self.velocity.x.abs() - friction.x < 0.0 {
                self.velocity.x = 0.0;
            } else {
                self.velocity.x -= friction.x.copysign(self.velocity.x);
            }
        }

        if self.velocity.y != 0.0 {
            if self.velocity.y.abs() - friction.y < 0.0 {
                self.velocity.y = 0.0;
            } else {
                self.velocity.y -= friction.y.copysign(self.velocity.y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn body() -> RigidBody {
        RigidBody::new(Vec2::new(100.0, 200.0), Vec2::new(5.0, 0.0))
    }

    #[test]
    fn add_velocity_clamps_each_axis_to_exact_limit() {
        let mut rb = body();
        rb.add_velocity(250.0, -1000.0);
        assert!(approx_eq(rb.velocity.x, 100.0));
        assert!(approx_eq(rb.velocity.y, -200.0));
    }

    #[test]
    fn per_axis_clamp_allows_diagonal_speed_above_axis_limit() {
        let mut rb = body();
        rb.add_velocity(500.0, 500.0);
        assert!(rb.velocity.length() > rb.max_velocity.x);
        assert!(rb.velocity.length() > rb.max_velocity.y);
    }

    #[test]
    fn add_velocity_below_limit_is_untouched() {
        let mut rb = body();
        rb.add_velocity(30.0, -40.0);
        assert!(approx_eq(rb.velocity.x, 30.0));
        assert!(approx_eq(rb.velocity.y, -40.0));
    }

    #[test]
    fn acceleration_accumulates_and_resets() {
        let mut rb = body();
        rb.add_acceleration(10.0, 0.0);
        rb.add_acceleration(0.0, -512.0);
        assert!(approx_eq(rb.acceleration.x, 10.0));
        assert!(approx_eq(rb.acceleration.y, -512.0));
        rb.reset_acceleration();
        assert!(approx_eq(rb.acceleration.x, 0.0));
        assert!(approx_eq(rb.acceleration.y, 0.0));
    }

    #[test]
    fn friction_decelerates_without_reversing() {
        let mut rb = body();
        rb.velocity = Vec2::new(10.0, -10.0);
        rb.apply_friction(4.0, 4.0);
        assert!(approx_eq(rb.velocity.x, 6.0));
        assert!(approx_eq(rb.velocity.y, -6.0));
    }

    #[test]
    fn friction_clamps_small_velocities_to_zero() {
        let mut rb = body();
        rb.velocity = Vec2::new(3.0, -3.0);
        rb.apply_friction(4.0, 4.0);
        assert!(approx_eq(rb.velocity.x, 0.0));
        assert!(approx_eq(rb.velocity.y, 0.0));
    }

    #[test]
    fn friction_sign_is_ignored() {
        let mut rb = body();
        rb.velocity = Vec2::new(-10.0, 0.0);
        rb.apply_friction(-4.0, 0.0);
        assert!(approx_eq(rb.velocity.x, -6.0));
    }

    #[test]
    fn friction_on_zero_velocity_is_a_no_op() {
        let mut rb = body();
        rb.apply_friction(100.0, 100.0);
        assert!(approx_eq(rb.velocity.x, 0.0));
        assert!(approx_eq(rb.velocity.y, 0.0));
    }
}
