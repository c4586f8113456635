//! Frame-driver entry points for the state stack.
//!
//! The stack is a resource whose state hooks need `&mut World`, so every
//! entry point here lifts it out of the world with `resource_scope`, runs
//! the hooks, and puts it back. The driver calls these once per frame, in
//! order: [`pump_state_requests`], [`update_states`], [`draw_states`],
//! [`process_state_removals`].

use bevy_ecs::prelude::*;

use crate::resources::statestack::{StateRequests, StateStack};

/// Apply transition intents queued by state hooks: switches immediately,
/// removals onto the stack's deferred queue.
pub fn pump_state_requests(world: &mut World) {
    let (switches, removals) = world.resource_mut::<StateRequests>().take();
    if switches.is_empty() && removals.is_empty() {
        return;
    }
    world.resource_scope(|world, mut stack: Mut<StateStack>| {
        for kind in switches {
            stack.switch_to(world, kind);
        }
        for kind in removals {
            stack.remove(kind);
        }
    });
}

/// Run the update traversal (see
/// [`StateStack::update`](crate::resources::statestack::StateStack::update)).
pub fn update_states(world: &mut World, dt: f32) {
    world.resource_scope(|world, mut stack: Mut<StateStack>| {
        stack.update(world, dt);
    });
}

/// Run the draw traversal, base first.
pub fn draw_states(world: &mut World) {
    world.resource_scope(|world, mut stack: Mut<StateStack>| {
        stack.draw(world);
    });
}

/// Drain the deferred removal queue. Call at end of frame.
pub fn process_state_removals(world: &mut World) {
    world.resource_scope(|world, mut stack: Mut<StateStack>| {
        stack.process_requests(world);
    });
}
