//! State stack transition event and observer.
//!
//! [`StateChangedEvent`] is triggered by
//! [`StateStack::switch_to`](crate::resources::statestack::StateStack::switch_to)
//! every time the active state changes, whether the target was freshly
//! constructed or an existing instance moved back to the tail. Observers can
//! subscribe to react in a decoupled manner; the engine ships one that logs
//! the transition.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::statestack::StateKind;

/// Fired when the active state at the tail of the stack changes.
#[derive(Event, Debug, Clone, Copy)]
pub struct StateChangedEvent {
    pub from: Option<StateKind>,
    pub to: StateKind,
}

/// Observer that logs every applied state transition.
pub fn observe_state_changed(trigger: On<StateChangedEvent>) {
    let event = trigger.event();
    match event.from {
        Some(from) => info!("state transition {:?} -> {:?}", from, event.to),
        None => info!("entering initial state {:?}", event.to),
    }
}
