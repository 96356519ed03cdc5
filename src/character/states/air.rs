//! Airborne fall, wall slide/lock, and knockback stun.

use bevy::math::Vec2;

use super::{CharacterState, StateCtx, StateId, can_dash, desired_ground_state, take_ground_jump, try_pogo};
use crate::character::abilities::Ability;
use crate::character::context::{JumpKind, WallContact};
use crate::character::motion::air::air_control;
use crate::character::motion::knockback::knockback_tick;
use crate::character::motion::wall::{LockPhase, SlideEffect, WallSlide};
use crate::sprites::AnimationState;

#[derive(Default)]
pub struct AirState {
    slide: WallSlide,
}

impl CharacterState for AirState {
    fn id(&self) -> StateId {
        StateId::Air
    }

    fn on_enter(&mut self, ctx: &mut StateCtx) {
        self.slide.reset();
        let anim = if ctx.velocity.y > 0.0 {
            AnimationState::Jump
        } else {
            AnimationState::Fall
        };
        ctx.anim.set_state(anim);
    }

    fn on_exit(&mut self, ctx: &mut StateCtx) {
        self.slide.stop(ctx.timers);
        ctx.gravity.0 = 1.0;
    }

    fn handle_input(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        // Hit stun swallows input until it runs out.
        if ctx.timers.knockback.active() {
            return None;
        }

        if ctx.input.jump_just_pressed {
            if ctx.timers.coyote.active() {
                return Some(take_ground_jump(ctx));
            }
            if ctx.shared.wall != WallContact::None && ctx.abilities.has(Ability::WallJump) {
                ctx.shared.pending_jump = Some(JumpKind::Wall {
                    away_sign: -ctx.shared.wall.sign(),
                });
                return Some(StateId::Jump);
            }
            if ctx.abilities.has(Ability::DoubleJump) && !ctx.shared.double_jump_used {
                ctx.shared.pending_jump = Some(JumpKind::Double);
                return Some(StateId::Jump);
            }
        }
        if ctx.input.dash_just_pressed && can_dash(ctx) {
            return Some(StateId::Dash);
        }
        try_pogo(ctx);
        None
    }

    fn update(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if ctx.shared.grounded && !ctx.timers.knockback.active() {
            if ctx.timers.jump_buffer.active() {
                return Some(take_ground_jump(ctx));
            }
            return Some(desired_ground_state(ctx));
        }

        if ctx.timers.knockback.active() {
            ctx.anim.set_state(AnimationState::Stagger);
        } else if ctx.shared.wall != WallContact::None
            && (ctx.velocity.y < 0.0 || self.slide.lock_phase() != LockPhase::None)
        {
            ctx.anim.set_state(AnimationState::WallSlide);
        } else if ctx.velocity.y > 0.0 {
            ctx.anim.set_state(AnimationState::Jump);
        } else {
            ctx.anim.set_state(AnimationState::Fall);
        }
        None
    }

    fn fixed_update(&mut self, ctx: &mut StateCtx) {
        if ctx.timers.knockback.active() {
            knockback_tick(
                ctx.velocity,
                ctx.shared.knockback_dir,
                &ctx.config.knockback,
                ctx.timers.knockback.progress(),
                ctx.shared.grounded,
            );
            return;
        }

        if let Some(force) = ctx.shared.pending_bounce.take() {
            ctx.velocity.y = force;
        }

        let wall = ctx.shared.wall;
        let sliding = wall != WallContact::None
            && !ctx.shared.grounded
            && (ctx.velocity.y < 0.0 || self.slide.lock_phase() != LockPhase::None);
        if sliding {
            let toward = ctx.input.axis.x * wall.sign();
            let effect = self.slide.fixed_tick(
                &ctx.config.wall,
                ctx.timers,
                toward < -0.1,
                toward >= ctx.config.wall.lock_hold_threshold,
                ctx.abilities.has(Ability::WallLock),
                ctx.input.jump_held,
                ctx.dt,
            );
            match effect {
                SlideEffect::Hold => {
                    ctx.velocity.0 = Vec2::ZERO;
                    ctx.gravity.0 = 0.0;
                    return;
                }
                SlideEffect::Cap(cap) => {
                    ctx.gravity.0 = 1.0;
                    if ctx.velocity.y < -cap {
                        ctx.velocity.y = -cap;
                    }
                }
            }
        } else {
            self.slide.stop(ctx.timers);
            ctx.gravity.0 = 1.0;
        }

        air_control(
            ctx.velocity,
            ctx.input.axis.x,
            &ctx.config.movement,
            ctx.timers,
            ctx.dt,
        );
    }
}
