//! Rising leap. One state covers ground, double, wall, and water jumps;
//! the entry impulse is picked from the pending jump kind.

use super::{CharacterState, StateCtx, StateId, can_dash, desired_ground_state, try_pogo};
use crate::character::abilities::Ability;
use crate::character::context::{JumpKind, WallContact};
use crate::character::motion::air::air_control;
use crate::sprites::AnimationState;

#[derive(Default)]
pub struct JumpState {
    cut_pending: bool,
}

impl CharacterState for JumpState {
    fn id(&self) -> StateId {
        StateId::Jump
    }

    fn on_enter(&mut self, ctx: &mut StateCtx) {
        self.cut_pending = false;
        let kind = ctx.shared.pending_jump.take().unwrap_or(JumpKind::Ground);

        // Any executed jump consumes both grace windows.
        ctx.timers.jump_buffer.clear();
        ctx.timers.coyote.clear();

        match kind {
            JumpKind::Ground => ctx.velocity.y = ctx.config.jump.force,
            JumpKind::Double => {
                ctx.shared.double_jump_used = true;
                ctx.velocity.y = ctx.config.jump.double_jump_force;
            }
            JumpKind::Wall { away_sign } => {
                // A wall jump refunds the double jump.
                ctx.shared.double_jump_used = false;
                ctx.velocity.x = away_sign * ctx.config.jump.wall_jump_horizontal;
                ctx.velocity.y = ctx.config.jump.wall_jump_vertical;
            }
            JumpKind::Water => {
                ctx.velocity.y = ctx.config.jump.water_jump_force;
                ctx.timers
                    .water_jump_cooldown
                    .start(ctx.config.jump.water_jump_cooldown);
            }
        }

        ctx.anim.set_state(AnimationState::Jump);
    }

    fn handle_input(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if ctx.input.jump_just_pressed {
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
        if ctx.input.jump_just_released && ctx.velocity.y > 0.0 {
            self.cut_pending = true;
        }
        if ctx.input.dash_just_pressed && can_dash(ctx) {
            return Some(StateId::Dash);
        }
        try_pogo(ctx);
        None
    }

    fn update(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if ctx.velocity.y <= 0.0 {
            if ctx.shared.grounded {
                return Some(desired_ground_state(ctx));
            }
            return Some(StateId::Air);
        }
        None
    }

    fn fixed_update(&mut self, ctx: &mut StateCtx) {
        // Bonking a ceiling kills the rise so the fall starts now.
        if ctx.shared.ceiling && ctx.velocity.y > 0.0 {
            ctx.velocity.y = 0.0;
        }
        if self.cut_pending {
            if ctx.velocity.y > 0.0 {
                ctx.velocity.y *= ctx.config.jump.cut_multiplier;
            }
            self.cut_pending = false;
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
