//! Grounded melee chain.

use bevy::math::Vec2;

use super::{CharacterState, StateCtx, StateId, can_dash, desired_ground_state};
use crate::character::combo::{AttackEnd, StrikeKind};
use crate::character::motion::move_toward;
use crate::sprites::AnimationState;

#[derive(Default)]
pub struct CombatState {
    impulse: Option<Vec2>,
}

impl CombatState {
    /// Start the next hit in the chain: strike request, step impulse, anim.
    fn begin_hit(&mut self, ctx: &mut StateCtx) -> bool {
        let Some(strike) = ctx.combo.start_attack(ctx.timers, &ctx.config.combo) else {
            return false;
        };
        let StrikeKind::Combo(index) = strike.kind else {
            return false;
        };

        let hit = ctx.config.combo.hit(index);
        let vertical = if ctx.shared.grounded {
            hit.upward_force
        } else {
            0.0
        };
        self.impulse = Some(Vec2::new(
            ctx.shared.facing.sign() * hit.forward_force,
            vertical,
        ));
        ctx.shared.pending_strikes.push(strike);
        ctx.anim.set_state(AnimationState::Attack(index as u8));
        true
    }
}

impl CharacterState for CombatState {
    fn id(&self) -> StateId {
        StateId::Combat
    }

    fn on_enter(&mut self, ctx: &mut StateCtx) {
        self.impulse = None;
        self.begin_hit(ctx);
    }

    fn handle_input(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if ctx.input.attack_just_pressed {
            // Mid-hit this queues; between hits it starts the next one.
            if self.begin_hit(ctx) {
                return None;
            }
        }
        if ctx.input.dash_just_pressed && can_dash(ctx) {
            return Some(StateId::Dash);
        }
        None
    }

    fn update(&mut self, ctx: &mut StateCtx) -> Option<StateId> {
        if ctx.timers.attack_active.just_finished() {
            match ctx.combo.finish_attack(ctx.timers, &ctx.config.combo) {
                AttackEnd::StartNext => {
                    if self.begin_hit(ctx) {
                        return None;
                    }
                }
                AttackEnd::Done | AttackEnd::ChainClosed => {}
            }
        }
        if !ctx.combo.attacking() {
            if ctx.shared.grounded {
                return Some(desired_ground_state(ctx));
            }
            return Some(StateId::Air);
        }
        None
    }

    fn fixed_update(&mut self, ctx: &mut StateCtx) {
        if let Some(imp) = self.impulse.take() {
            ctx.velocity.x += imp.x;
            ctx.velocity.y += imp.y;
        }
        // The step impulse bleeds off while the swing plays out; airborne
        // swings keep their momentum.
        if ctx.shared.grounded {
            ctx.velocity.x = move_toward(
                ctx.velocity.x,
                0.0,
                ctx.config.movement.air_drift_decay * ctx.dt,
            );
        }
    }
}
