//! Dash burst, on land or underwater.

use bevy::math::Vec2;

use super::{CharacterState, StateCtx, StateId, desired_ground_state};
use crate::character::motion::dash::dash_direction;
use crate::sprites::AnimationState;

#[derive(Default)]
pub struct DashState {
    dir: Vec2,
    swim: bool,
}

impl CharacterState for DashState {
    fn id(&self) -> StateId {
        StateId::Dash
    }

    fn on_enter(&mut self, ctx: &mut StateCtx) {
        self.swim = ctx.shared.in_water;
        self.dir = dash_direction(ctx.input.axis, ctx.shared.facing, &ctx.config.dash);

        ctx.combo.cancel(ctx.timers);
        if !ctx.shared.grounded && !self.swim {
            ctx.shared.air_dash_count = ctx.shared.air_dash_count.saturating_add(1);
        }

        let cfg = &ctx.config.dash;
        if self.swim {
            ctx.timers.dash_duration.start(cfg.swim_duration);
            ctx.timers.swim_dash_cooldown.start(cfg.swim_cooldown);
        } else {
            ctx.timers.dash_duration.start(cfg.duration);
            ctx.timers.dash_cooldown.start(cfg.cooldown);
        }

        ctx.gravity.0 = 0.0;
        ctx.anim.set_state(AnimationState::Dash);
    }

    fn on_exit(&mut self, ctx: &mut StateCtx) {
        ctx.gravity.0 = 1.0;
        let slow = ctx.config.dash.end_slowdown;
        ctx.velocity.x *= slow;
        ctx.velocity.y *= slow;
    }

    fn update(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if ctx.timers.dash_duration.active() {
            return None;
        }
        if ctx.shared.in_water {
            return Some(StateId::Swim);
        }
        if ctx.shared.grounded {
            return Some(desired_ground_state(ctx));
        }
        Some(StateId::Air)
    }

    fn fixed_update(&mut self, ctx: &mut StateCtx) {
        let speed = if self.swim {
            ctx.config.dash.swim_speed
        } else {
            ctx.config.dash.speed
        };
        ctx.velocity.x = self.dir.x * speed;
        ctx.velocity.y = self.dir.y * speed;
    }
}
