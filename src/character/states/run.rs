//! Grounded movement at run speed (requires the run ability).

use super::{CharacterState, StateCtx, StateId, can_dash, desired_ground_state, take_ground_jump};
use crate::character::motion::ground::ground_move;
use crate::sprites::AnimationState;

#[derive(Default)]
pub struct RunState;

impl CharacterState for RunState {
    fn id(&self) -> StateId {
        StateId::Run
    }

    fn on_enter(&mut self, ctx: &mut StateCtx) {
        ctx.anim.set_state(AnimationState::Run);
    }

    fn handle_input(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if ctx.timers.jump_buffer.active() {
            // Running jumps keep their speed for a short grace window.
            ctx.timers
                .jump_momentum
                .start(ctx.config.jump.momentum_grace_time);
            return Some(take_ground_jump(ctx));
        }
        if ctx.input.dash_just_pressed && can_dash(ctx) {
            return Some(StateId::Dash);
        }
        if ctx.input.attack_just_pressed && ctx.combo.can_attack(ctx.timers, &ctx.config.combo) {
            return Some(StateId::Combat);
        }
        None
    }

    fn update(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if !ctx.shared.grounded {
            return Some(StateId::Air);
        }
        let desired = desired_ground_state(ctx);
        (desired != StateId::Run).then_some(desired)
    }

    fn fixed_update(&mut self, ctx: &mut StateCtx) {
        ground_move(
            ctx.velocity,
            ctx.shared,
            ctx.input.axis.x,
            ctx.config.movement.run_speed,
            &ctx.config.movement,
            ctx.dt,
        );
    }
}
