//! In-water locomotion with surface buoyancy.

use super::{CharacterState, StateCtx, StateId, desired_ground_state};
use crate::character::abilities::Ability;
use crate::character::context::JumpKind;
use crate::character::motion::move_toward;
use crate::character::motion::swim::buoyancy_tick;
use crate::sprites::AnimationState;

/// How far below the surface a water jump is still allowed, in units of
/// the configured float depth.
const SURFACE_JUMP_DEPTH: f32 = 2.0;

#[derive(Default)]
pub struct SwimState;

impl CharacterState for SwimState {
    fn id(&self) -> StateId {
        StateId::Swim
    }

    fn on_enter(&mut self, ctx: &mut StateCtx) {
        // Entering water always breaks a combo chain.
        ctx.combo.cancel(ctx.timers);
        ctx.gravity.0 = 0.0;
        ctx.shared.float_offset = 0.0;
        ctx.shared.bob_velocity = 0.0;
        ctx.shared.bob_phase = 0.0;
        ctx.anim.set_state(AnimationState::Swim);
    }

    fn on_exit(&mut self, ctx: &mut StateCtx) {
        ctx.gravity.0 = 1.0;
    }

    fn handle_input(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        let cfg = &ctx.config;
        if ctx.input.jump_just_pressed
            && !ctx.timers.water_jump_cooldown.active()
            && ctx.shared.water_surface - ctx.position.y
                <= cfg.swim.surface_offset * SURFACE_JUMP_DEPTH
        {
            ctx.shared.pending_jump = Some(JumpKind::Water);
            return Some(StateId::Jump);
        }
        if ctx.input.dash_just_pressed
            && ctx.abilities.has(Ability::Dash)
            && !ctx.timers.swim_dash_cooldown.active()
        {
            return Some(StateId::Dash);
        }
        None
    }

    fn update(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if !ctx.shared.in_water {
            if ctx.shared.grounded {
                return Some(desired_ground_state(ctx));
            }
            return Some(StateId::Air);
        }
        None
    }

    fn fixed_update(&mut self, ctx: &mut StateCtx) {
        let cfg = &ctx.config.swim;
        let target_speed = if ctx.input.run_held {
            cfg.fast_speed
        } else {
            cfg.speed
        };
        let target = ctx.input.axis.x * target_speed;
        ctx.velocity.x = move_toward(ctx.velocity.x, target, cfg.accel * ctx.dt);

        let surface = ctx.shared.water_surface;
        buoyancy_tick(ctx.velocity, ctx.position, ctx.shared, cfg, surface, ctx.dt);
    }
}
