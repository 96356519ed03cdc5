//! Character domain: the closed set of motion states.
//!
//! One implementation per state, dispatched through the `CharacterState`
//! trait. States hold only transient per-activation fields, reset on
//! entry; everything long-lived sits in `StateContext` or the timer bank.

mod air;
mod combat;
mod dash;
mod idle;
mod jump;
mod ledge_climb;
mod ledge_grab;
mod run;
mod swim;
mod walk;

pub use air::AirState;
pub use combat::CombatState;
pub use dash::DashState;
pub use idle::IdleState;
pub use jump::JumpState;
pub use ledge_climb::LedgeClimbState;
pub use ledge_grab::LedgeGrabState;
pub use run::RunState;
pub use swim::SwimState;
pub use walk::WalkState;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::abilities::{Ability, AbilityRegistry};
use super::combo::{ComboTracker, StrikeKind, StrikeRequest};
use super::config::CharacterConfig;
use super::context::{JumpKind, StateContext};
use super::input::ActionInput;
use super::timers::TimerBank;
use crate::sprites::AnimationController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Idle,
    Walk,
    Run,
    Jump,
    Air,
    Dash,
    Swim,
    Combat,
    LedgeGrab,
    LedgeClimb,
}

impl StateId {
    pub const COUNT: usize = 10;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StateId::Idle => "Idle",
            StateId::Walk => "Walk",
            StateId::Run => "Run",
            StateId::Jump => "Jump",
            StateId::Air => "Air",
            StateId::Dash => "Dash",
            StateId::Swim => "Swim",
            StateId::Combat => "Combat",
            StateId::LedgeGrab => "LedgeGrab",
            StateId::LedgeClimb => "LedgeClimb",
        }
    }
}

/// Everything a state may touch during one lifecycle call. Borrowed from
/// the character's components for the duration of the call, so states can
/// be driven without an `App` in tests.
pub struct StateCtx<'a> {
    pub dt: f32,
    pub input: &'a ActionInput,
    pub config: &'a CharacterConfig,
    pub abilities: &'a AbilityRegistry,
    pub timers: &'a mut TimerBank,
    pub shared: &'a mut StateContext,
    pub combo: &'a mut ComboTracker,
    pub velocity: &'a mut LinearVelocity,
    pub gravity: &'a mut GravityScale,
    pub position: &'a mut Position,
    pub anim: &'a mut AnimationController,
}

/// Lifecycle interface. `on_exit` must leave every override the state
/// introduced (gravity scale, held velocity) restored, because the next
/// state does not know what it left behind. Velocity belongs to
/// `fixed_update`; the only writes outside it are transition-routed
/// impulses in `on_enter`/`on_exit`.
pub trait CharacterState: Send + Sync {
    fn id(&self) -> StateId;
    fn on_enter(&mut self, _ctx: &mut StateCtx) {}
    fn on_exit(&mut self, _ctx: &mut StateCtx) {}
    fn handle_input(&mut self, _ctx: &mut StateCtx) -> Option<StateId> {
        None
    }
    fn update(&mut self, _ctx: &mut StateCtx) -> Option<StateId> {
        None
    }
    fn fixed_update(&mut self, _ctx: &mut StateCtx) {}
}

/// Build the full state set, ordered by `StateId::index`.
pub fn make_states() -> Vec<Box<dyn CharacterState>> {
    vec![
        Box::new(IdleState::default()),
        Box::new(WalkState::default()),
        Box::new(RunState::default()),
        Box::new(JumpState::default()),
        Box::new(AirState::default()),
        Box::new(DashState::default()),
        Box::new(SwimState::default()),
        Box::new(CombatState::default()),
        Box::new(LedgeGrabState::default()),
        Box::new(LedgeClimbState::default()),
    ]
}

// ----------------------------------------------------------------------------
// Shared transition guards
// ----------------------------------------------------------------------------

/// Which grounded state fits the current input.
pub(crate) fn desired_ground_state(ctx: &StateCtx) -> StateId {
    if !ctx.input.has_move() {
        StateId::Idle
    } else if ctx.input.run_held && ctx.abilities.has(Ability::Run) {
        StateId::Run
    } else {
        StateId::Walk
    }
}

/// Dash eligibility. Airborne dashes additionally consume from the
/// air-dash budget.
pub(crate) fn can_dash(ctx: &StateCtx) -> bool {
    if !ctx.abilities.has(Ability::Dash) || ctx.timers.dash_cooldown.active() {
        return false;
    }
    if ctx.shared.grounded {
        true
    } else {
        ctx.shared.air_dash_count < ctx.config.dash.max_air_dashes
    }
}

/// A buffered jump executed from the ground (or coyote window).
pub(crate) fn take_ground_jump(ctx: &mut StateCtx) -> StateId {
    ctx.shared.pending_jump = Some(JumpKind::Ground);
    StateId::Jump
}

/// Downward air strike. Fires the strike without leaving the current
/// state; the bounce arrives later only if it connects.
pub(crate) fn try_pogo(ctx: &mut StateCtx) -> bool {
    if !ctx.input.attack_just_pressed || ctx.input.axis.y >= -0.5 {
        return false;
    }
    if !ctx.abilities.has(Ability::Pogo) || ctx.timers.pogo_cooldown.active() {
        return false;
    }
    ctx.timers.pogo_cooldown.start(ctx.config.combo.pogo_cooldown);
    ctx.shared.pending_strikes.push(StrikeRequest {
        kind: StrikeKind::Pogo,
    });
    true
}
