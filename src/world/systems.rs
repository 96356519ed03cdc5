//! World interactions: hazards, pickups, checkpoints, and dummy respawns.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::character::{AbilityUnlockedEvent, Player};
use crate::damage::Health;
use crate::damage::events::{DamageEvent, DeathEvent};
use crate::world::arena::DUMMY_COLOR;
use crate::world::{
    AbilityPickup, CheckpointPlate, DummyRespawns, Spikes, TrainingDummy, arena,
};

const DUMMY_RESPAWN_SECONDS: f32 = 2.5;
const FLASH_FADE_RATE: f32 = 6.0;

/// Spike contact deals touch damage. Knockback direction comes from the
/// spike position, so the damage pipeline shoves the player away from it.
pub(crate) fn spike_touch(
    mut collisions: MessageReader<CollisionStart>,
    spike_query: Query<(&Spikes, &Position)>,
    player_query: Query<Entity, With<Player>>,
    mut damage_writer: MessageWriter<DamageEvent>,
) {
    for event in collisions.read() {
        let pair = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        for (spike_entity, other) in pair {
            let Ok((spikes, spike_pos)) = spike_query.get(spike_entity) else {
                continue;
            };
            if player_query.get(other).is_err() {
                continue;
            }
            damage_writer.write(DamageEvent {
                target: other,
                amount: spikes.damage,
                source_position: spike_pos.0,
                knockback_override: None,
            });
        }
    }
}

/// Touching a pickup unlocks its ability and removes the pickup.
pub(crate) fn pickup_touch(
    mut commands: Commands,
    mut collisions: MessageReader<CollisionStart>,
    pickup_query: Query<&AbilityPickup>,
    player_query: Query<Entity, With<Player>>,
    mut unlock_writer: MessageWriter<AbilityUnlockedEvent>,
) {
    for event in collisions.read() {
        let pair = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        for (pickup_entity, other) in pair {
            let Ok(pickup) = pickup_query.get(pickup_entity) else {
                continue;
            };
            if player_query.get(other).is_err() {
                continue;
            }
            unlock_writer.write(AbilityUnlockedEvent {
                ability: pickup.ability,
            });
            commands.entity(pickup_entity).despawn();
        }
    }
}

/// Standing on a checkpoint plate moves the respawn point and tops off health.
pub(crate) fn checkpoint_touch(
    mut collisions: MessageReader<CollisionStart>,
    plate_query: Query<&Position, With<CheckpointPlate>>,
    mut player_query: Query<&mut Health, With<Player>>,
    mut checkpoint: ResMut<crate::core::Checkpoint>,
) {
    for event in collisions.read() {
        let pair = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        for (plate_entity, other) in pair {
            let Ok(plate_pos) = plate_query.get(plate_entity) else {
                continue;
            };
            let Ok(mut health) = player_query.get_mut(other) else {
                continue;
            };
            checkpoint.position = plate_pos.0 + Vec2::new(0.0, 24.0);
            let missing = health.max - health.current;
            if missing > 0.0 {
                health.heal(missing);
                info!("checkpoint reached, health restored");
            }
        }
    }
}

/// Eases hit-flashed dummy sprites back to their base color.
pub(crate) fn fade_dummy_flash(
    time: Res<Time>,
    mut dummy_query: Query<&mut Sprite, With<TrainingDummy>>,
) {
    let blend = (FLASH_FADE_RATE * time.delta_secs()).clamp(0.0, 1.0);
    for mut sprite in dummy_query.iter_mut() {
        sprite.color = sprite.color.mix(&DUMMY_COLOR, blend);
    }
}

/// Dead dummies despawn and queue a respawn at their home position.
pub(crate) fn handle_dummy_deaths(
    mut commands: Commands,
    mut deaths: MessageReader<DeathEvent>,
    dummy_query: Query<&TrainingDummy>,
    mut respawns: ResMut<DummyRespawns>,
) {
    for event in deaths.read() {
        let Ok(dummy) = dummy_query.get(event.entity) else {
            continue;
        };
        respawns.pending.push((
            dummy.home,
            Timer::from_seconds(DUMMY_RESPAWN_SECONDS, TimerMode::Once),
        ));
        commands.entity(event.entity).despawn();
        debug!("training dummy destroyed, respawn queued");
    }
}

pub(crate) fn respawn_dummies(
    mut commands: Commands,
    time: Res<Time>,
    mut respawns: ResMut<DummyRespawns>,
) {
    let mut ready = Vec::new();
    respawns.pending.retain_mut(|(home, timer)| {
        timer.tick(time.delta());
        if timer.remaining_secs() == 0.0 {
            ready.push(*home);
            false
        } else {
            true
        }
    });
    for home in ready {
        arena::spawn_dummy(&mut commands, home);
    }
}
