//! Core domain: camera, pause flow, and player respawn.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::character::combo::ComboTracker;
use crate::character::context::StateContext;
use crate::character::states::{StateCtx, StateId};
use crate::character::timers::TimerBank;
use crate::character::{AbilityRegistry, ActionInput, CharacterConfig, Player, StateMachine};
use crate::core::resources::Checkpoint;
use crate::core::state::GameState;
use crate::damage::Health;
use crate::damage::events::DeathEvent;
use crate::sprites::AnimationController;

const CAMERA_FOLLOW_RATE: f32 = 5.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn camera_follow(
    time: Res<Time>,
    player_query: Query<&Position, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(position) = player_query.single() else {
        return;
    };
    let Ok(mut camera) = camera_query.single_mut() else {
        return;
    };
    let blend = (CAMERA_FOLLOW_RATE * time.delta_secs()).clamp(0.0, 1.0);
    let target = position.0.extend(camera.translation.z);
    camera.translation = camera.translation.lerp(target, blend);
}

/// Escape toggles between running and paused. The physics clock pauses
/// with the game so the body does not keep integrating underneath.
pub(crate) fn toggle_pause(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut physics_time: ResMut<Time<Physics>>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    match state.get() {
        GameState::Run => {
            physics_time.pause();
            next_state.set(GameState::Paused);
            info!("paused");
        }
        GameState::Paused => {
            physics_time.unpause();
            next_state.set(GameState::Run);
            info!("resumed");
        }
        GameState::Boot => {}
    }
}

/// A dead player comes back at the checkpoint with full health and a
/// clean slate: timers, combo chain, and air actions all reset. The
/// machine returns to Idle through the normal exit/enter path so the
/// dying state restores whatever it overrode.
pub(crate) fn respawn_player(
    mut deaths: MessageReader<DeathEvent>,
    checkpoint: Res<Checkpoint>,
    input: Res<ActionInput>,
    config: Res<CharacterConfig>,
    abilities: Res<AbilityRegistry>,
    mut player_query: Query<
        (
            &mut StateMachine,
            &mut Position,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Health,
            &mut TimerBank,
            &mut StateContext,
            &mut ComboTracker,
            &mut AnimationController,
        ),
        With<Player>,
    >,
) {
    for event in deaths.read() {
        let Ok((
            mut machine,
            mut position,
            mut velocity,
            mut gravity,
            mut health,
            mut timers,
            mut shared,
            mut combo,
            mut anim,
        )) = player_query.get_mut(event.entity)
        else {
            continue;
        };

        let mut ctx = StateCtx {
            dt: 0.0,
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
        machine.change_state(StateId::Idle, &mut ctx);
        drop(ctx);

        position.0 = checkpoint.position;
        velocity.0 = Vec2::ZERO;
        gravity.0 = 1.0;
        health.heal(health.max);

        *timers = TimerBank::default();
        combo.cancel(&mut timers);
        shared.air_dash_count = 0;
        shared.double_jump_used = false;
        shared.pending_jump = None;
        shared.pending_bounce = None;
        shared.pending_strikes.clear();
        shared.active_ledge = None;
        shared.knockback_dir = Vec2::ZERO;
        shared.ground_smooth_vel = 0.0;

        info!("player respawned at checkpoint");
    }
}
