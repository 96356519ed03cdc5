//! Hanging from a grabbed ledge.

use bevy::math::Vec2;

use super::{CharacterState, StateCtx, StateId};
use crate::character::context::JumpKind;
use crate::sprites::AnimationState;

#[derive(Default)]
pub struct LedgeGrabState {
    anchor: Vec2,
    side_sign: f32,
}

impl CharacterState for LedgeGrabState {
    fn id(&self) -> StateId {
        StateId::LedgeGrab
    }

    fn on_enter(&mut self, ctx: &mut StateCtx) {
        // Falls back to hanging in place if the gate fired without a target.
        match &ctx.shared.active_ledge {
            Some(target) => {
                self.anchor = target.grab_point;
                self.side_sign = target.side.sign();
                ctx.shared.facing = target.side;
            }
            None => {
                self.anchor = ctx.position.0;
                self.side_sign = ctx.shared.facing.sign();
            }
        }

        ctx.velocity.0 = Vec2::ZERO;
        ctx.gravity.0 = 0.0;
        ctx.position.0 = self.anchor;
        ctx.shared.pending_bounce = None;
        ctx.timers.ledge_hold.start(ctx.config.ledge.min_hold_time);
        ctx.anim.set_state(AnimationState::LedgeGrab);
    }

    fn on_exit(&mut self, ctx: &mut StateCtx) {
        ctx.gravity.0 = 1.0;
    }

    fn handle_input(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        let cfg = &ctx.config.ledge;

        if ctx.input.jump_just_pressed {
            ctx.shared.pending_jump = Some(JumpKind::Wall {
                away_sign: -self.side_sign,
            });
            ctx.timers.ledge_cooldown.start(cfg.regrab_cooldown);
            ctx.shared.active_ledge = None;
            return Some(StateId::Jump);
        }

        if ctx.input.axis.y < -0.5 {
            ctx.velocity.x = -self.side_sign * cfg.release_impulse;
            ctx.timers.ledge_cooldown.start(cfg.regrab_cooldown);
            ctx.shared.active_ledge = None;
            return Some(StateId::Air);
        }

        // Climbing only unlocks after the minimum hang.
        if ctx.input.axis.y > 0.5 && !ctx.timers.ledge_hold.active() {
            return Some(StateId::LedgeClimb);
        }
        None
    }

    fn fixed_update(&mut self, ctx: &mut StateCtx) {
        ctx.velocity.0 = Vec2::ZERO;
        ctx.position.0 = self.anchor;
    }
}
