//! Fixed-duration pull-up over a grabbed ledge.

use bevy::math::Vec2;

use super::{CharacterState, StateCtx, StateId, desired_ground_state};
use crate::sprites::AnimationState;

#[derive(Default)]
pub struct LedgeClimbState {
    remaining: f32,
}

impl CharacterState for LedgeClimbState {
    fn id(&self) -> StateId {
        StateId::LedgeClimb
    }

    fn on_enter(&mut self, ctx: &mut StateCtx) {
        let anchor = match &ctx.shared.active_ledge {
            Some(target) => target.surface_point,
            None => ctx.position.0,
        };
        ctx.position.0 = anchor;
        ctx.velocity.0 = Vec2::ZERO;
        ctx.gravity.0 = 0.0;
        self.remaining = ctx.config.ledge.climb_duration;
        ctx.anim.set_state(AnimationState::LedgeClimb);
    }

    fn on_exit(&mut self, ctx: &mut StateCtx) {
        ctx.gravity.0 = 1.0;
    }

    fn update(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        self.remaining -= ctx.dt;
        if self.remaining > 0.0 {
            return None;
        }
        ctx.velocity.y = ctx.config.ledge.climb_hop;
        ctx.shared.active_ledge = None;
        Some(desired_ground_state(ctx))
    }

    fn fixed_update(&mut self, ctx: &mut StateCtx) {
        ctx.velocity.0 = Vec2::ZERO;
    }
}
