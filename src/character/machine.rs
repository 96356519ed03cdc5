//! Character domain: the state machine component.

use bevy::prelude::*;

use super::states::{CharacterState, StateCtx, StateId, make_states};

/// Owns the state objects and the single active state. All lifecycle
/// dispatch goes through here so exit-before-enter ordering holds for
/// every transition, including forced ones.
#[derive(Component)]
pub struct StateMachine {
    states: Vec<Box<dyn CharacterState>>,
    current: StateId,
    started: bool,
}

impl StateMachine {
    pub fn new(initial: StateId) -> Self {
        let states = make_states();
        debug_assert_eq!(states.len(), StateId::COUNT);
        Self {
            states,
            current: initial,
            started: false,
        }
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    /// Runs the initial state's `on_enter` exactly once, on the first
    /// frame the machine is driven.
    pub fn ensure_started(&mut self, ctx: &mut StateCtx) {
        if self.started {
            return;
        }
        self.started = true;
        self.states[self.current.index()].on_enter(ctx);
    }

    /// Exit the old state, swap, enter the new one. `on_exit` always
    /// completes before `on_enter` begins; transitioning to the current
    /// state re-runs both.
    pub fn change_state(&mut self, next: StateId, ctx: &mut StateCtx) {
        let from = self.current;
        self.states[from.index()].on_exit(ctx);
        self.current = next;
        debug!("State transition: {} -> {}", from.name(), next.name());
        self.states[next.index()].on_enter(ctx);
    }

    pub fn handle_input(&mut self, ctx: &mut StateCtx) {
        if let Some(next) = self.states[self.current.index()].handle_input(ctx) {
            self.change_state(next, ctx);
        }
    }

    pub fn update(&mut self, ctx: &mut StateCtx) {
        if let Some(next) = self.states[self.current.index()].update(ctx) {
            self.change_state(next, ctx);
        }
    }

    /// The only place motion for the active state is applied. Never
    /// transitions; requests surface on the next frame tick instead.
    pub fn fixed_update(&mut self, ctx: &mut StateCtx) {
        self.states[self.current.index()].fixed_update(ctx);
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new(StateId::Idle)
    }
}
