//! Debug domain: dev hotkeys and the state overlay.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::combo::ComboTracker;
use crate::character::context::StateContext;
use crate::character::timers::TimerBank;
use crate::character::{AbilityRegistry, CharacterConfig, Player, StateMachine};
use crate::damage::Health;
use crate::debug::state::DebugState;
use crate::debug::ui::{self, DebugOverlay};

/// Toggle the overlay with F1
pub(crate) fn toggle_overlay(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing: Query<Entity, With<DebugOverlay>>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }
    debug_state.overlay_visible = !debug_state.overlay_visible;
    if debug_state.overlay_visible {
        ui::spawn_overlay(&mut commands);
    } else {
        for entity in &existing {
            commands.entity(entity).despawn();
        }
    }
}

/// Handle keyboard shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut abilities: ResMut<AbilityRegistry>,
    mut player_query: Query<&mut Health, With<Player>>,
) {
    // F2: unlock every ability
    if keyboard.just_pressed(KeyCode::F2) {
        *abilities = AbilityRegistry::all_unlocked();
        debug_state.set_message(abilities.summary(), 3.0);
        info!("[DEBUG] all abilities unlocked");
    }

    // F3: toggle invincibility
    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.invincible = !debug_state.invincible;
        let msg = if debug_state.invincible {
            "Invincibility ON"
        } else {
            "Invincibility OFF"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] {}", msg);
    }

    // F4: full heal
    if keyboard.just_pressed(KeyCode::F4)
        && let Ok(mut health) = player_query.single_mut()
    {
        health.heal(health.max);
        debug_state.set_message("Full Heal", 2.0);
        info!("[DEBUG] full heal");
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Keeps the post-hit invulnerability window open while invincible, so
/// the damage gate refuses every hit.
pub(crate) fn apply_invincibility(
    debug_state: Res<DebugState>,
    mut player_query: Query<(&mut Health, &mut TimerBank), With<Player>>,
) {
    if !debug_state.invincible {
        return;
    }
    for (mut health, mut timers) in &mut player_query {
        timers.hurt_invuln.start(1.0);
        if health.current < health.max {
            health.heal(health.max);
        }
    }
}

/// Update the overlay with current controller state
pub(crate) fn update_overlay(
    debug_state: Res<DebugState>,
    config: Res<CharacterConfig>,
    abilities: Res<AbilityRegistry>,
    player_query: Query<
        (
            &StateMachine,
            &StateContext,
            &TimerBank,
            &ComboTracker,
            &Position,
            &LinearVelocity,
            &Health,
        ),
        With<Player>,
    >,
    mut overlay_query: Query<&mut Text, With<DebugOverlay>>,
) {
    if !debug_state.overlay_visible {
        return;
    }
    let Ok((machine, shared, timers, combo, position, velocity, health)) = player_query.single()
    else {
        return;
    };
    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };

    let status = debug_state
        .status_message
        .as_ref()
        .map(|(message, _)| message.as_str())
        .unwrap_or("");

    **text = format!(
        "State: {}\n\
         Pos: ({:.0}, {:.0})  Vel: ({:.0}, {:.0})\n\
         HP: {:.0}/{:.0}{}\n\
         grounded:{} wall:{:?} water:{} ceiling:{}\n\
         air dashes:{} double jump used:{}\n\
         coyote:{:.2} buffer:{:.2} dash cd:{:.2} knockback:{:.2}\n\
         combo:{}/{} attacking:{} queued:{} window:{:.2}\n\
         {}\n\
         {}",
        machine.current().name(),
        position.0.x,
        position.0.y,
        velocity.0.x,
        velocity.0.y,
        health.current,
        health.max,
        if debug_state.invincible {
            "  [INVINCIBLE]"
        } else {
            ""
        },
        shared.grounded,
        shared.wall,
        shared.in_water,
        shared.ceiling,
        shared.air_dash_count,
        shared.double_jump_used,
        timers.coyote.remaining(),
        timers.jump_buffer.remaining(),
        timers.dash_cooldown.remaining(),
        timers.knockback.remaining(),
        combo.current(),
        config.combo.max_hits(),
        combo.attacking(),
        combo.queued(),
        timers.combo_window.remaining(),
        abilities.summary(),
        status
    );
}
