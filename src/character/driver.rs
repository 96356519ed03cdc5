//! Character domain: the controller.
//!
//! Composition root for one character: folds probe results into the shared
//! context, advances the timer bank, runs the gate transitions that may
//! preempt any state, then hands the frame to the machine. The fixed-rate
//! driver is the only caller of `fixed_update`.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::Player;
use super::abilities::AbilityRegistry;
use super::combo::ComboTracker;
use super::config::CharacterConfig;
use super::context::{Facing, StateContext};
use super::events::{AbilityUnlockedEvent, PogoBounceEvent};
use super::input::ActionInput;
use super::ledge::within_grab_window;
use super::machine::StateMachine;
use super::probe::{EnvProbe, collider_half_extents};
use super::states::{StateCtx, StateId};
use super::timers::TimerBank;
use crate::damage::{DamageEvent, DeathEvent, Health, StrikeEvent};
use crate::sprites::AnimationController;

/// Damage intake for the player. Runs before the frame driver so the
/// knockback gate fires on the same frame the hit lands.
pub(crate) fn apply_player_damage(
    config: Res<CharacterConfig>,
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<
        (
            Entity,
            &Position,
            &mut Health,
            &mut StateContext,
            &mut TimerBank,
            &mut ComboTracker,
            &mut AnimationController,
        ),
        With<Player>,
    >,
) {
    for event in damage_events.read() {
        let Ok((entity, position, mut health, mut shared, mut timers, mut combo, mut anim)) =
            query.get_mut(event.target)
        else {
            continue;
        };
        if timers.hurt_invuln.active() {
            continue;
        }

        health.take_damage(event.amount);
        shared.knockback_dir = match event.knockback_override {
            Some(dir) => dir,
            None => (position.0 - event.source_position).normalize_or(Vec2::Y),
        };
        timers.knockback.start(config.knockback.duration);
        timers.hurt_invuln.start(config.hurt_invuln_seconds);
        combo.cancel(&mut timers);
        anim.trigger_flash(config.hurt_invuln_seconds);

        debug!("Player took {} damage, {} health left", event.amount, health.current);
        if health.is_dead() {
            death_events.write(DeathEvent { entity });
        }
    }
}

/// Grants from pickups and the debug overlay.
pub(crate) fn handle_ability_unlocks(
    mut unlocks: MessageReader<AbilityUnlockedEvent>,
    mut registry: ResMut<AbilityRegistry>,
) {
    for event in unlocks.read() {
        if registry.unlock(event.ability) {
            info!("Ability unlocked: {}", event.ability.name());
        }
    }
}

/// Bounce replies from pogo-able objects. Refunds air actions and leaves
/// the impulse for the air state to apply on its next fixed tick.
pub(crate) fn handle_pogo_bounce(
    mut bounces: MessageReader<PogoBounceEvent>,
    mut query: Query<&mut StateContext, With<Player>>,
) {
    for bounce in bounces.read() {
        for mut shared in &mut query {
            shared.pending_bounce = Some(bounce.force);
            shared.air_dash_count = 0;
            shared.double_jump_used = false;
        }
    }
}

/// The frame tick.
pub(crate) fn frame_driver(
    time: Res<Time>,
    input: Res<ActionInput>,
    config: Res<CharacterConfig>,
    abilities: Res<AbilityRegistry>,
    mut strikes: MessageWriter<StrikeEvent>,
    mut query: Query<
        (
            Entity,
            &EnvProbe,
            &Collider,
            &mut StateMachine,
            &mut StateContext,
            &mut TimerBank,
            &mut ComboTracker,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Position,
            &mut AnimationController,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (
        entity,
        probe,
        collider,
        mut machine,
        mut shared,
        mut timers,
        mut combo,
        mut velocity,
        mut gravity,
        mut position,
        mut anim,
    ) in &mut query
    {
        shared.was_grounded = shared.grounded;
        shared.grounded = probe.grounded;
        shared.wall = probe.wall;
        shared.ceiling = probe.ceiling;
        shared.in_water = probe.in_water;
        shared.water_surface = probe.water_surface;
        shared.ledge = probe.ledge;

        if shared.grounded && !shared.was_grounded {
            shared.reset_air_actions(config.dash.reset_air_dashes_on_ground);
        }
        // Coyote restarts to its full window every grounded frame.
        if shared.grounded {
            timers.coyote.start(config.jump.coyote_time);
        }
        if input.jump_just_pressed {
            timers.jump_buffer.start(config.jump.buffer_time);
        }

        timers.tick_all(dt);
        combo.frame_tick(&mut timers, &config.combo);

        // Facing follows input except in states that commit a direction.
        if input.has_move()
            && !timers.knockback.active()
            && !matches!(
                machine.current(),
                StateId::Dash | StateId::Combat | StateId::LedgeGrab | StateId::LedgeClimb
            )
        {
            shared.facing = Facing::from_sign(input.axis.x);
        }

        let half = collider_half_extents(collider);
        let mut ctx = StateCtx {
            dt,
            input: &input,
            config: &config,
            abilities: &abilities,
            timers: &mut timers,
            shared: &mut shared,
            combo: &mut combo,
            velocity: &mut velocity,
            gravity: &mut gravity,
            position: &mut position,
            anim: &mut anim,
        };
        machine.ensure_started(&mut ctx);

        // Gate transitions, in priority order.
        if ctx.timers.knockback.active()
            && !ctx.shared.in_water
            && machine.current() != StateId::Air
        {
            machine.change_state(StateId::Air, &mut ctx);
        }
        if ctx.shared.pending_bounce.is_some() && machine.current() != StateId::Air {
            machine.change_state(StateId::Air, &mut ctx);
        }
        if let Some(target) = ctx.shared.ledge
            && ctx.velocity.y < 0.0
            && !ctx.timers.knockback.active()
            && !matches!(machine.current(), StateId::LedgeGrab | StateId::LedgeClimb)
            && within_grab_window(&target, ctx.position.0, half, &ctx.config.ledge)
        {
            ctx.shared.active_ledge = Some(target);
            machine.change_state(StateId::LedgeGrab, &mut ctx);
        }
        // Dash is exempt: it hands off to Swim itself when the burst ends.
        if ctx.shared.in_water
            && ctx.velocity.y <= 0.0
            && !matches!(
                machine.current(),
                StateId::Swim | StateId::Dash | StateId::LedgeGrab | StateId::LedgeClimb
            )
        {
            machine.change_state(StateId::Swim, &mut ctx);
        }

        machine.handle_input(&mut ctx);
        machine.update(&mut ctx);
        drop(ctx);

        for strike in shared.pending_strikes.drain(..) {
            strikes.write(StrikeEvent {
                attacker: entity,
                kind: strike.kind,
            });
        }
        anim.facing_right = shared.facing == Facing::Right;
    }
}

/// The fixed tick. Runs before the physics step integrates, so the
/// velocity the active state writes here is what this step uses.
pub(crate) fn fixed_driver(
    time: Res<Time>,
    input: Res<ActionInput>,
    config: Res<CharacterConfig>,
    abilities: Res<AbilityRegistry>,
    mut query: Query<
        (
            &mut StateMachine,
            &mut StateContext,
            &mut TimerBank,
            &mut ComboTracker,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Position,
            &mut AnimationController,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (
        mut machine,
        mut shared,
        mut timers,
        mut combo,
        mut velocity,
        mut gravity,
        mut position,
        mut anim,
    ) in &mut query
    {
        let mut ctx = StateCtx {
            dt,
            input: &input,
            config: &config,
            abilities: &abilities,
            timers: &mut timers,
            shared: &mut shared,
            combo: &mut combo,
            velocity: &mut velocity,
            gravity: &mut gravity,
            position: &mut position,
            anim: &mut anim,
        };
        machine.ensure_started(&mut ctx);
        machine.fixed_update(&mut ctx);
    }
}
