//! Stack of game states with transparent/transcendent traversal.
//!
//! The [`StateStack`] owns an ordered sequence of live states; the tail is
//! the active one. Each entry carries two independent flags:
//!
//! - **transcendent** – states beneath this one keep receiving `update`
//! - **transparent** – states beneath this one keep being drawn
//!
//! so a pause overlay can keep the game visible (transparent) while
//! suspending its logic (not transcendent).
//!
//! At most one state of a kind lives in the stack: [`StateStack::switch_to`]
//! moves an existing instance to the tail instead of constructing a second
//! one. Removal is deferred to a queue drained by
//! [`StateStack::process_requests`] at end of frame.
//!
//! State hooks receive `&mut World`. The stack itself is lifted out of the
//! world with `resource_scope` while hooks run (see
//! [`crate::systems::statestack`]), so a hook that wants to change the
//! stack queues its intent on [`StateRequests`] instead of re-borrowing it.

use bevy_ecs::prelude::*;
use log::warn;
use rustc_hash::FxHashMap;

use crate::events::statechange::StateChangedEvent;

/// Kinds of states a game can stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Intro,
    MainMenu,
    Game,
    Paused,
    GameOver,
}

/// Per-entry traversal flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateFlags {
    pub transparent: bool,
    pub transcendent: bool,
}

/// Lifecycle hooks and per-frame processing for a stacked state.
///
/// `on_create`/`on_destroy` fire once per instance; `activate`/`deactivate`
/// fire every time the state gains or loses the top of the stack.
pub trait State: Send + Sync {
    fn on_create(&mut self, _world: &mut World) {}
    fn on_destroy(&mut self, _world: &mut World) {}
    fn activate(&mut self, _world: &mut World) {}
    fn deactivate(&mut self, _world: &mut World) {}
    fn update(&mut self, world: &mut World, dt: f32);
    fn draw(&mut self, world: &mut World);
}

type StateFactory = Box<dyn Fn() -> Box<dyn State> + Send + Sync>;

struct StateEntry {
    kind: StateKind,
    flags: StateFlags,
    state: Box<dyn State>,
}

/// Ordered stack of live states plus the factory registry and the deferred
/// removal queue.
#[derive(Resource, Default)]
pub struct StateStack {
    states: Vec<StateEntry>,
    pending_removal: Vec<StateKind>,
    factories: FxHashMap<StateKind, (StateFlags, StateFactory)>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor and the initial flags for a state kind.
    pub fn register<F>(&mut self, kind: StateKind, flags: StateFlags, factory: F)
    where
        F: Fn() -> Box<dyn State> + Send + Sync + 'static,
    {
        self.factories.insert(kind, (flags, Box::new(factory)));
    }

    /// Make `kind` the active state.
    ///
    /// An instance already in the stack is moved to the tail and activated,
    /// never recreated. Otherwise the current top is deactivated and a new
    /// instance is constructed from the registered factory, pushed, created,
    /// and activated. Unregistered kinds are refused with a warning.
    pub fn switch_to(&mut self, world: &mut World, kind: StateKind) {
        let from = self.top_kind();

        if let Some(index) = self.states.iter().position(|entry| entry.kind == kind) {
            if let Some(top) = self.states.last_mut() {
                top.state.deactivate(world);
            }
            let entry = self.states.remove(index);
            self.states.push(entry);
            if let Some(top) = self.states.last_mut() {
                top.state.activate(world);
            }
            world.trigger(StateChangedEvent { from, to: kind });
            return;
        }

        if !self.factories.contains_key(&kind) {
            warn!("no state factory registered for {:?}", kind);
            return;
        }

        if let Some(top) = self.states.last_mut() {
            top.state.deactivate(world);
        }

        let (flags, factory) = &self.factories[&kind];
        let entry = StateEntry {
            kind,
            flags: *flags,
            state: factory(),
        };
        self.states.push(entry);
        if let Some(top) = self.states.last_mut() {
            top.state.on_create(world);
            top.state.activate(world);
        }
        world.trigger(StateChangedEvent { from, to: kind });
    }

    /// Queue `kind` for removal at the next [`StateStack::process_requests`].
    pub fn remove(&mut self, kind: StateKind) {
        self.pending_removal.push(kind);
    }

    /// Drain the removal queue, destroying each queued state that is still
    /// in the stack. Absent kinds are ignored.
    pub fn process_requests(&mut self, world: &mut World) {
        while !self.pending_removal.is_empty() {
            let kind = self.pending_removal.remove(0);
            if let Some(index) = self.states.iter().position(|entry| entry.kind == kind) {
                let mut entry = self.states.remove(index);
                entry.state.on_destroy(world);
            }
        }
    }

    /// Update the top state. While the top is transcendent, every state
    /// from the first non-transcendent one below it up to the tail is
    /// updated, in stack order.
    pub fn update(&mut self, world: &mut World, dt: f32) {
        if self.states.is_empty() {
            return;
        }
        let top = self.states.len() - 1;
        let begin = if self.states[top].flags.transcendent && self.states.len() > 1 {
            self.traversal_base(|flags| flags.transcendent)
        } else {
            top
        };
        for index in begin..=top {
            self.states[index].state.update(world, dt);
        }
    }

    /// Draw the top state. While the top is transparent, every state from
    /// the first non-transparent one below it up to the tail is drawn,
    /// base first so the layering is correct.
    pub fn draw(&mut self, world: &mut World) {
        if self.states.is_empty() {
            return;
        }
        let top = self.states.len() - 1;
        let begin = if self.states[top].flags.transparent && self.states.len() > 1 {
            self.traversal_base(|flags| flags.transparent)
        } else {
            top
        };
        for index in begin..=top {
            self.states[index].state.draw(world);
        }
    }

    /// Walk down from the tail to the first entry without the flag; that
    /// entry is included in the traversal. Reaches the base when every
    /// entry carries the flag.
    fn traversal_base(&self, has_flag: impl Fn(&StateFlags) -> bool) -> usize {
        let mut index = self.states.len() - 1;
        while index > 0 {
            if !has_flag(&self.states[index].flags) {
                break;
            }
            index -= 1;
        }
        index
    }

    /// Whether `kind` is in the stack and not queued for removal.
    pub fn has_state(&self, kind: StateKind) -> bool {
        self.states.iter().any(|entry| entry.kind == kind)
            && !self.pending_removal.contains(&kind)
    }

    pub fn top_kind(&self) -> Option<StateKind> {
        self.states.last().map(|entry| entry.kind)
    }

    /// Kinds currently in the stack, base to tail.
    pub fn kinds(&self) -> Vec<StateKind> {
        self.states.iter().map(|entry| entry.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn flags(&self, kind: StateKind) -> Option<StateFlags> {
        self.states
            .iter()
            .find(|entry| entry.kind == kind)
            .map(|entry| entry.flags)
    }

    /// Toggle draw transparency. Returns false if the kind is not stacked.
    pub fn set_transparent(&mut self, kind: StateKind, transparent: bool) -> bool {
        if let Some(entry) = self.states.iter_mut().find(|entry| entry.kind == kind) {
            entry.flags.transparent = transparent;
            true
        } else {
            false
        }
    }

    /// Toggle update transcendence. Returns false if the kind is not stacked.
    pub fn set_transcendent(&mut self, kind: StateKind, transcendent: bool) -> bool {
        if let Some(entry) = self.states.iter_mut().find(|entry| entry.kind == kind) {
            entry.flags.transcendent = transcendent;
            true
        } else {
            false
        }
    }
}

/// Transition intents queued by state hooks and applied by the driver.
///
/// Hooks run while the stack is lifted out of the world, so they cannot
/// call [`StateStack::switch_to`] themselves; they queue here and
/// [`crate::systems::statestack::pump_state_requests`] applies the intents
/// between frames.
#[derive(Resource, Debug, Default)]
pub struct StateRequests {
    switches: Vec<StateKind>,
    removals: Vec<StateKind>,
}

impl StateRequests {
    pub fn request_switch(&mut self, kind: StateKind) {
        self.switches.push(kind);
    }

    pub fn request_remove(&mut self, kind: StateKind) {
        self.removals.push(kind);
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty() && self.removals.is_empty()
    }

    /// Take all queued intents, leaving the queues empty.
    pub fn take(&mut self) -> (Vec<StateKind>, Vec<StateKind>) {
        (
            std::mem::take(&mut self.switches),
            std::mem::take(&mut self.removals),
        )
    }
}
