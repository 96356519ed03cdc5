//! Grounded movement at base speed.

use super::{CharacterState, StateCtx, StateId, can_dash, desired_ground_state, take_ground_jump};
use crate::character::motion::ground::ground_move;
use crate::sprites::AnimationState;

#[derive(Default)]
pub struct WalkState;

impl CharacterState for WalkState {
    fn id(&self) -> StateId {
        StateId::Walk
    }

    fn on_enter(&mut self, ctx: &mut StateCtx) {
        ctx.anim.set_state(AnimationState::Walk);
    }

    fn handle_input(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if ctx.timers.jump_buffer.active() {
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
        (desired != StateId::Walk).then_some(desired)
    }

    fn fixed_update(&mut self, ctx: &mut StateCtx) {
        ground_move(
            ctx.velocity,
            ctx.shared,
            ctx.input.axis.x,
            ctx.config.movement.move_speed,
            &ctx.config.movement,
            ctx.dt,
        );
    }
}
